//! Policy form validation
//!
//! - Policy number is required
//! - Coverage amount and premium must be greater than zero
//! - End date must be after the start date
//! - Description, when given, is at most 1000 characters

use rust_decimal::Decimal;

use core_kernel::validation::trimmed_len;
use core_kernel::ValidationResult;

use crate::policy::PolicyForm;

pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Validator for policy forms
pub struct PolicyValidator;

impl PolicyValidator {
    pub fn validate_form(form: &PolicyForm) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if form.policy_number.trim().is_empty() {
            result.add_error("policyNumber", "Policy number is required");
        }

        if form.coverage_amount <= Decimal::ZERO {
            result.add_error("coverageAmount", "Coverage amount must be greater than 0");
        }

        if form.premium <= Decimal::ZERO {
            result.add_error("premium", "Premium must be greater than 0");
        }

        if form.end_date <= form.start_date {
            result.add_error("endDate", "End date must be after start date");
        }

        if let Some(description) = &form.description {
            if trimmed_len(description) > DESCRIPTION_MAX_CHARS {
                result.add_error(
                    "description",
                    format!("Description cannot exceed {DESCRIPTION_MAX_CHARS} characters"),
                );
            }
        }

        result
    }
}
