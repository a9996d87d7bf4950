//! Claim snapshot as mirrored from the backend

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{ClaimId, Currency, DocumentId, Money, PolicyId, UserId};
use crate::error::ClaimError;

/// Claim status
///
/// The status names the party currently holding the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Being written by the employee, not yet lodged
    Draft,
    /// Lodged by the employee, or returned to the employee by HR
    Employee,
    /// Under HR review
    Hr,
    /// Forwarded to the insurer
    Insurer,
    /// Approved by the insurer
    Approved,
    /// Rejected by the insurer
    Rejected,
}

impl ClaimStatus {
    /// All statuses in lifecycle order
    pub const ALL: [ClaimStatus; 6] = [
        ClaimStatus::Draft,
        ClaimStatus::Employee,
        ClaimStatus::Hr,
        ClaimStatus::Insurer,
        ClaimStatus::Approved,
        ClaimStatus::Rejected,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Draft => "draft",
            ClaimStatus::Employee => "employee",
            ClaimStatus::Hr => "hr",
            ClaimStatus::Insurer => "insurer",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Whether the claim has reached a final decision
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Approved | ClaimStatus::Rejected)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ClaimStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| ClaimError::UnknownStatus(s.to_string()))
    }
}

/// Kind of insurance the claim is made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimType {
    Life,
    Vehicle,
}

impl fmt::Display for ClaimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClaimType::Life => "life",
            ClaimType::Vehicle => "vehicle",
        })
    }
}

impl FromStr for ClaimType {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "life" => Ok(ClaimType::Life),
            "vehicle" => Ok(ClaimType::Vehicle),
            _ => Err(ClaimError::UnknownClaimType(s.to_string())),
        }
    }
}

/// Specific reason for a claim, constrained by its `ClaimType`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOption {
    // Life
    Hospitalization,
    Channelling,
    Medication,
    Death,
    // Vehicle
    Accident,
    Theft,
    Fire,
    NaturalDisaster,
    /// An option this portal does not know about
    #[serde(other)]
    Other,
}

impl ClaimOption {
    /// Options offered for a claim type
    pub fn options_for(claim_type: ClaimType) -> &'static [ClaimOption] {
        match claim_type {
            ClaimType::Life => &[
                ClaimOption::Hospitalization,
                ClaimOption::Channelling,
                ClaimOption::Medication,
                ClaimOption::Death,
            ],
            ClaimType::Vehicle => &[
                ClaimOption::Accident,
                ClaimOption::Theft,
                ClaimOption::Fire,
                ClaimOption::NaturalDisaster,
            ],
        }
    }

    /// Whether this option may be used with a claim type
    ///
    /// Unknown options are accepted; the backend is the authority on them.
    pub fn belongs_to(&self, claim_type: ClaimType) -> bool {
        *self == ClaimOption::Other || Self::options_for(claim_type).contains(self)
    }
}

/// Monetary fields of a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimAmount {
    /// Amount requested by the employee
    pub requested: Decimal,
    /// Amount approved by the insurer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<Decimal>,
    #[serde(default)]
    pub currency: Currency,
}

impl ClaimAmount {
    /// Creates a requested amount in the default currency
    pub fn requested(amount: Decimal) -> Self {
        Self {
            requested: amount,
            approved: None,
            currency: Currency::default(),
        }
    }

    /// Requested amount as money
    pub fn requested_money(&self) -> Money {
        Money::new(self.requested, self.currency)
    }
}

/// One line of the coverage breakdown attached when HR forwards a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageBreakdownItem {
    #[serde(default)]
    pub coverage_type: String,
    #[serde(default)]
    pub requested_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CoverageBreakdownItem {
    pub fn new(coverage_type: impl Into<String>, requested_amount: Decimal) -> Self {
        Self {
            coverage_type: coverage_type.into(),
            requested_amount,
            notes: None,
        }
    }
}

/// Supporting document uploaded with a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimDocument {
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A claim as mirrored from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// Backend identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: ClaimId,
    /// Human readable claim reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim_number: Option<String>,
    /// Employee who lodged the claim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<UserId>,
    /// Policy the claim is made against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<PolicyId>,
    pub claim_type: ClaimType,
    pub claim_option: ClaimOption,
    pub claim_amount: ClaimAmount,
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coverage_breakdown: Vec<CoverageBreakdownItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurer_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<ClaimDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Claim {
    /// Creates a draft claim snapshot
    pub fn draft(
        id: ClaimId,
        claim_type: ClaimType,
        claim_option: ClaimOption,
        requested: Decimal,
    ) -> Self {
        Self {
            id,
            claim_number: None,
            employee_id: None,
            policy: None,
            claim_type,
            claim_option,
            claim_amount: ClaimAmount::requested(requested),
            status: ClaimStatus::Draft,
            description: None,
            coverage_breakdown: Vec::new(),
            hr_notes: None,
            insurer_notes: None,
            return_reason: None,
            rejection_reason: None,
            documents: Vec::new(),
            submitted_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether the option matches the claim type
    pub fn has_consistent_option(&self) -> bool {
        self.claim_option.belongs_to(self.claim_type)
    }

    /// Sum of the coverage breakdown currently attached to the claim
    pub fn coverage_total(&self) -> Decimal {
        self.coverage_breakdown
            .iter()
            .map(|item| item.requested_amount)
            .sum()
    }

    /// Looks up an attached document
    pub fn document(&self, id: &DocumentId) -> Option<&ClaimDocument> {
        self.documents.iter().find(|doc| &doc.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_wire_names() {
        let json = serde_json::to_string(&ClaimStatus::Insurer).unwrap();
        assert_eq!(json, "\"insurer\"");
        assert_eq!("HR".parse::<ClaimStatus>().unwrap(), ClaimStatus::Hr);
        assert!("pending".parse::<ClaimStatus>().is_err());
        assert_eq!(" Vehicle".parse::<ClaimType>().unwrap(), ClaimType::Vehicle);
        assert!("health".parse::<ClaimType>().is_err());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
        assert!(!ClaimStatus::Insurer.is_terminal());
    }

    #[test]
    fn test_option_belongs_to_type() {
        assert!(ClaimOption::Hospitalization.belongs_to(ClaimType::Life));
        assert!(!ClaimOption::Theft.belongs_to(ClaimType::Life));
        assert!(ClaimOption::NaturalDisaster.belongs_to(ClaimType::Vehicle));
        assert!(ClaimOption::Other.belongs_to(ClaimType::Vehicle));
    }

    #[test]
    fn test_deserialize_backend_claim() {
        let json = r#"{
            "_id": "66a1f0c2e4b0a1b2c3d4e5f6",
            "claimType": "life",
            "claimOption": "hospitalization",
            "claimAmount": { "requested": 1000 },
            "status": "hr",
            "coverageBreakdown": [
                { "coverageType": "Medical Expenses", "requestedAmount": 600.5 }
            ],
            "documents": [ { "_id": "d1", "name": "bill.pdf" } ]
        }"#;

        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.id.as_str(), "66a1f0c2e4b0a1b2c3d4e5f6");
        assert_eq!(claim.status, ClaimStatus::Hr);
        assert_eq!(claim.claim_amount.requested, dec!(1000));
        assert_eq!(claim.claim_amount.currency, Currency::LKR);
        assert_eq!(claim.coverage_total(), dec!(600.5));
        assert!(claim.document(&DocumentId::new("d1")).is_some());
    }

    #[test]
    fn test_unknown_option_falls_back_to_other() {
        let json = r#"{
            "_id": "c1",
            "claimType": "vehicle",
            "claimOption": "windscreen",
            "claimAmount": { "requested": 50 },
            "status": "draft"
        }"#;
        let claim: Claim = serde_json::from_str(json).unwrap();
        assert_eq!(claim.claim_option, ClaimOption::Other);
        assert!(claim.has_consistent_option());
    }
}
