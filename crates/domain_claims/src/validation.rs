//! Claim validation rules
//!
//! Validators run before any workflow request is sent to the backend. They
//! never fail with `Err`; every problem is recorded in a field-keyed
//! [`ValidationResult`] so the form can show it next to the input.
//!
//! # Rules
//!
//! ## Forward to insurer
//! - At least one coverage breakdown line
//! - Every line has a coverage type and a requested amount above zero
//! - The breakdown total does not exceed the claim's requested amount
//! - HR notes are at most 1000 characters
//!
//! ## Return
//! - Reason is 10 to 500 characters once trimmed
//! - The acting role may return a claim from its current status
//!
//! ## Decision
//! - Status is `approved` or `rejected`
//! - Approvals carry an approved amount above zero
//! - Rejections carry a reason

use rust_decimal::Decimal;

use core_kernel::validation::{item_field, trimmed_len};
use core_kernel::{Money, Role, ValidationResult};

use crate::adjudication::{DecisionRequest, ForwardToInsurerData};
use crate::claim::{Claim, ClaimStatus};
use crate::workflow;

/// Maximum length of HR and insurer notes
pub const NOTES_MAX_CHARS: usize = 1000;
/// Minimum length of a return reason
pub const RETURN_REASON_MIN_CHARS: usize = 10;
/// Maximum length of a return reason
pub const RETURN_REASON_MAX_CHARS: usize = 500;

/// Field keys used in claim validation results
pub mod fields {
    pub const COVERAGE_BREAKDOWN: &str = "coverageBreakdown";
    pub const COVERAGE_TYPE: &str = "coverageType";
    pub const REQUESTED_AMOUNT: &str = "requestedAmount";
    pub const TOTAL: &str = "total";
    pub const HR_NOTES: &str = "hrNotes";
    pub const REASON: &str = "reason";
    pub const STATUS: &str = "status";
    pub const APPROVED_AMOUNT: &str = "approvedAmount";
    pub const REJECTION_REASON: &str = "rejectionReason";
    pub const INSURER_NOTES: &str = "insurerNotes";
}

/// Validator for claim workflow payloads
pub struct ClaimValidator;

impl ClaimValidator {
    /// Validates the payload HR sends when forwarding a claim to the insurer
    ///
    /// # Arguments
    ///
    /// * `data` - The coverage breakdown and notes entered by HR
    /// * `claim` - The claim snapshot being forwarded
    pub fn validate_forward_to_insurer(
        data: &ForwardToInsurerData,
        claim: &Claim,
    ) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if data.coverage_breakdown.is_empty() {
            result.add_error(
                fields::COVERAGE_BREAKDOWN,
                "At least one coverage breakdown item is required",
            );
        }

        for (index, item) in data.coverage_breakdown.iter().enumerate() {
            if item.coverage_type.trim().is_empty() {
                result.add_error(
                    item_field(fields::COVERAGE_BREAKDOWN, index, fields::COVERAGE_TYPE),
                    "Coverage type is required",
                );
            }
            if item.requested_amount <= Decimal::ZERO {
                result.add_error(
                    item_field(fields::COVERAGE_BREAKDOWN, index, fields::REQUESTED_AMOUNT),
                    "Requested amount must be greater than 0",
                );
            }
        }

        let total = data.total_requested();
        if total > claim.claim_amount.requested {
            let total = Money::new(total, claim.claim_amount.currency);
            let limit = claim.claim_amount.requested_money();
            result.add_error(
                fields::TOTAL,
                format!("Total coverage amount ({total}) exceeds the claim amount ({limit})"),
            );
        }

        if let Some(notes) = &data.hr_notes {
            if notes.chars().count() > NOTES_MAX_CHARS {
                result.add_error(
                    fields::HR_NOTES,
                    format!("HR notes cannot exceed {NOTES_MAX_CHARS} characters"),
                );
            }
        }

        result
    }

    /// Validates the reason given when returning a claim
    pub fn validate_return_reason(reason: &str) -> ValidationResult {
        let mut result = ValidationResult::ok();
        let length = trimmed_len(reason);

        if length == 0 {
            result.add_error(fields::REASON, "Return reason is required");
        } else if length < RETURN_REASON_MIN_CHARS {
            result.add_error(
                fields::REASON,
                format!("Return reason must be at least {RETURN_REASON_MIN_CHARS} characters"),
            );
        } else if length > RETURN_REASON_MAX_CHARS {
            result.add_error(
                fields::REASON,
                format!("Return reason cannot exceed {RETURN_REASON_MAX_CHARS} characters"),
            );
        }

        result
    }

    /// Validates that `role` may return the claim from its current status
    pub fn validate_claim_for_return(claim: &Claim, role: Role) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if workflow::return_target(claim.status, role).is_none() {
            let message = if claim.status.is_terminal() {
                format!("Claim has already been {} and cannot be returned", claim.status)
            } else {
                format!(
                    "A {} cannot return a claim in {} status",
                    role.label(),
                    claim.status
                )
            };
            result.add_error(fields::STATUS, message);
        }

        result
    }

    /// Validates an insurer decision
    pub fn validate_decision(decision: &DecisionRequest) -> ValidationResult {
        let mut result = ValidationResult::ok();

        match decision.status {
            ClaimStatus::Approved => {
                let positive = decision
                    .approved_amount
                    .is_some_and(|amount| amount > Decimal::ZERO);
                if !positive {
                    result.add_error(
                        fields::APPROVED_AMOUNT,
                        "Approved amount must be greater than 0",
                    );
                }
            }
            ClaimStatus::Rejected => {
                let has_reason = decision
                    .rejection_reason
                    .as_deref()
                    .is_some_and(|reason| !reason.trim().is_empty());
                if !has_reason {
                    result.add_error(fields::REJECTION_REASON, "Rejection reason is required");
                }
            }
            other => {
                result.add_error(
                    fields::STATUS,
                    format!("Decision must be approved or rejected, not {other}"),
                );
            }
        }

        if let Some(notes) = &decision.insurer_notes {
            if notes.chars().count() > NOTES_MAX_CHARS {
                result.add_error(
                    fields::INSURER_NOTES,
                    format!("Insurer notes cannot exceed {NOTES_MAX_CHARS} characters"),
                );
            }
        }

        result
    }
}
