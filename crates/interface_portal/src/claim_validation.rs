//! Claim validation state
//!
//! Wraps [`ClaimValidator`] for the claim screens: each check replaces the
//! current error map, so the screen always shows the errors of the last
//! attempted action.

use core_kernel::{Role, ValidationResult};
use domain_claims::{Claim, ClaimValidator, DecisionRequest, ForwardToInsurerData};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimValidation {
    errors: ValidationResult,
}

impl ClaimValidation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks a forward-to-insurer payload against the claim
    pub fn validate_forward(&mut self, data: &ForwardToInsurerData, claim: &Claim) -> bool {
        self.replace(ClaimValidator::validate_forward_to_insurer(data, claim))
    }

    /// Checks the return reason and that `role` may return the claim
    pub fn validate_return(&mut self, reason: &str, claim: &Claim, role: Role) -> bool {
        let mut errors = ClaimValidator::validate_return_reason(reason);
        errors.merge(ClaimValidator::validate_claim_for_return(claim, role));
        self.replace(errors)
    }

    pub fn validate_decision(&mut self, decision: &DecisionRequest) -> bool {
        self.replace(ClaimValidator::validate_decision(decision))
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.error_for(field)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_valid()
    }

    /// Clears one field's error, e.g. when the user edits it
    pub fn clear_field(&mut self, field: &str) {
        self.errors.clear_field(field);
    }

    pub fn clear(&mut self) {
        self.errors = ValidationResult::ok();
    }

    fn replace(&mut self, errors: ValidationResult) -> bool {
        self.errors = errors;
        self.errors.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ClaimId;
    use domain_claims::validation::fields;
    use domain_claims::{ClaimOption, ClaimStatus, ClaimType, CoverageBreakdownItem};
    use rust_decimal_macros::dec;

    fn claim_in(status: ClaimStatus) -> Claim {
        let mut claim = Claim::draft(
            ClaimId::new("c1"),
            ClaimType::Life,
            ClaimOption::Hospitalization,
            dec!(1000),
        );
        claim.status = status;
        claim
    }

    #[test]
    fn test_return_merges_reason_and_role_errors() {
        let mut validation = ClaimValidation::new();
        let claim = claim_in(ClaimStatus::Approved);

        assert!(!validation.validate_return("short", &claim, Role::HrOfficer));
        assert!(validation.error_for(fields::REASON).is_some());
        assert!(validation.error_for(fields::STATUS).is_some());
    }

    #[test]
    fn test_each_check_replaces_previous_errors() {
        let mut validation = ClaimValidation::new();
        let claim = claim_in(ClaimStatus::Hr);

        assert!(!validation.validate_forward(&ForwardToInsurerData::default(), &claim));
        assert!(validation.error_for(fields::COVERAGE_BREAKDOWN).is_some());

        let data = ForwardToInsurerData::new(vec![CoverageBreakdownItem::new("Room", dec!(400))]);
        assert!(validation.validate_forward(&data, &claim));
        assert!(validation.errors().is_empty());
    }

    #[test]
    fn test_clear_field() {
        let mut validation = ClaimValidation::new();
        validation.validate_decision(&DecisionRequest::reject("  "));
        assert!(!validation.is_valid());

        validation.clear_field(fields::REJECTION_REASON);
        assert!(validation.is_valid());
    }
}
