//! Group policies as the portal sees them

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Currency, Money, PolicyId, UserId};

use crate::error::PolicyError;

/// Line of business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Life,
    Vehicle,
}

impl PolicyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyType::Life => "life",
            PolicyType::Vehicle => "vehicle",
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyType {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "life" => Ok(PolicyType::Life),
            "vehicle" => Ok(PolicyType::Vehicle),
            _ => Err(PolicyError::UnknownType(s.to_string())),
        }
    }
}

/// Policy status as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Inactive,
    Pending,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub const ALL: [PolicyStatus; 5] = [
        PolicyStatus::Active,
        PolicyStatus::Inactive,
        PolicyStatus::Pending,
        PolicyStatus::Expired,
        PolicyStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "active",
            PolicyStatus::Inactive => "inactive",
            PolicyStatus::Pending => "pending",
            PolicyStatus::Expired => "expired",
            PolicyStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyStatus {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PolicyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| PolicyError::UnknownStatus(s.to_string()))
    }
}

/// A policy record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    #[serde(rename = "_id", alias = "id")]
    pub id: PolicyId,
    pub policy_number: String,
    pub policy_type: PolicyType,
    pub status: PolicyStatus,
    pub coverage_amount: Decimal,
    pub premium: Decimal,
    #[serde(default)]
    pub currency: Currency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_agent: Option<UserId>,
    /// Employees covered by the policy
    #[serde(default)]
    pub beneficiaries: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Policy {
    /// Whether the policy is active and `date` falls inside its term
    pub fn is_in_force_on(&self, date: NaiveDate) -> bool {
        self.status == PolicyStatus::Active && self.start_date <= date && date <= self.end_date
    }

    pub fn coverage(&self) -> Money {
        Money::new(self.coverage_amount, self.currency)
    }

    /// Whether an employee is listed as a beneficiary
    pub fn covers(&self, user: &UserId) -> bool {
        self.beneficiaries.contains(user)
    }
}

/// Values of the create/edit policy form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyForm {
    pub policy_number: String,
    pub policy_type: PolicyType,
    pub coverage_amount: Decimal,
    pub premium: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PolicyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurance_agent: Option<UserId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beneficiaries: Vec<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PolicyForm {
    /// Pre-fills the form from an existing policy
    pub fn from_policy(policy: &Policy) -> Self {
        Self {
            policy_number: policy.policy_number.clone(),
            policy_type: policy.policy_type,
            coverage_amount: policy.coverage_amount,
            premium: policy.premium,
            start_date: policy.start_date,
            end_date: policy.end_date,
            status: Some(policy.status),
            insurance_agent: policy.insurance_agent.clone(),
            beneficiaries: policy.beneficiaries.clone(),
            description: policy.description.clone(),
        }
    }
}

/// Query parameters for `GET /policies`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<PolicyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PolicyStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl PolicyQuery {
    pub fn by_status(status: PolicyStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_json() -> &'static str {
        r#"{
            "_id": "pol-1",
            "policyNumber": "LIFE-2024-001",
            "policyType": "life",
            "status": "active",
            "coverageAmount": 500000,
            "premium": 1250.5,
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "beneficiaries": ["emp-1", "emp-2"]
        }"#
    }

    #[test]
    fn test_deserialize_policy() {
        let policy: Policy = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(policy.policy_type, PolicyType::Life);
        assert_eq!(policy.premium, dec!(1250.5));
        assert_eq!(policy.currency, Currency::LKR);
        assert!(policy.covers(&UserId::new("emp-2")));
        assert!(policy.insurance_agent.is_none());
    }

    #[test]
    fn test_in_force_window() {
        let policy: Policy = serde_json::from_str(sample_json()).unwrap();
        assert!(policy.is_in_force_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(policy.is_in_force_on(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!policy.is_in_force_on(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Cancelled".parse::<PolicyStatus>().unwrap(), PolicyStatus::Cancelled);
        assert!("lapsed".parse::<PolicyStatus>().is_err());
        assert_eq!(" vehicle".parse::<PolicyType>().unwrap(), PolicyType::Vehicle);
    }

    #[test]
    fn test_query_serialization() {
        let query = PolicyQuery::by_status(PolicyStatus::Pending);
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "pending" }));
    }
}
