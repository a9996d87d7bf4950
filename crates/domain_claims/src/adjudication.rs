//! Insurer decision and reviewer request payloads
//!
//! These are the bodies the portal sends to the backend for the workflow
//! actions that carry data. Each one is validated by
//! [`ClaimValidator`](crate::validation::ClaimValidator) before it is sent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::claim::{ClaimStatus, CoverageBreakdownItem};

/// Body of `POST /claims/:id/forward`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardToInsurerData {
    #[serde(default)]
    pub coverage_breakdown: Vec<CoverageBreakdownItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hr_notes: Option<String>,
}

impl ForwardToInsurerData {
    pub fn new(coverage_breakdown: Vec<CoverageBreakdownItem>) -> Self {
        Self {
            coverage_breakdown,
            hr_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.hr_notes = Some(notes.into());
        self
    }

    /// Sum of the requested amounts across the breakdown
    pub fn total_requested(&self) -> Decimal {
        self.coverage_breakdown
            .iter()
            .map(|item| item.requested_amount)
            .sum()
    }
}

/// Body of `POST /claims/:id/return`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub reason: String,
}

impl ReturnRequest {
    /// Builds a request with the reason trimmed as it will be stored
    pub fn new(reason: impl AsRef<str>) -> Self {
        Self {
            reason: reason.as_ref().trim().to_string(),
        }
    }
}

/// Body of `POST /claims/:id/decision`
///
/// `status` is deliberately the full `ClaimStatus`: a form can hold any
/// value, and only `approved` or `rejected` pass validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRequest {
    pub status: ClaimStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurer_notes: Option<String>,
}

impl DecisionRequest {
    /// Creates an approval
    pub fn approve(amount: Decimal) -> Self {
        Self {
            status: ClaimStatus::Approved,
            approved_amount: Some(amount),
            rejection_reason: None,
            insurer_notes: None,
        }
    }

    /// Creates a rejection
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            status: ClaimStatus::Rejected,
            approved_amount: None,
            rejection_reason: Some(reason.into()),
            insurer_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.insurer_notes = Some(notes.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_forward_payload_wire_shape() {
        let item = CoverageBreakdownItem::new("Medical Expenses", dec!(600));
        let data = ForwardToInsurerData::new(vec![item]).with_notes("Verified receipts");
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["coverageBreakdown"][0]["coverageType"], "Medical Expenses");
        assert_eq!(json["coverageBreakdown"][0]["requestedAmount"], 600.0);
        assert_eq!(json["hrNotes"], "Verified receipts");
    }

    #[test]
    fn test_return_request_trims() {
        assert_eq!(ReturnRequest::new("  missing receipts  ").reason, "missing receipts");
    }

    #[test]
    fn test_decision_wire_shape() {
        let json = serde_json::to_value(DecisionRequest::reject("Not covered")).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["rejectionReason"], "Not covered");
        assert!(json.get("approvedAmount").is_none());
    }
}
