//! Property-Based Test Generators
//!
//! Proptest strategies for claim workflow data.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Role;
use domain_claims::{ClaimStatus, CoverageBreakdownItem};

pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::ALL.to_vec())
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop::sample::select(ClaimStatus::ALL.to_vec())
}

/// Positive amounts with two decimal places, up to Rs 1,000,000
pub fn positive_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// One to five breakdown lines with non-blank coverage types
pub fn coverage_items_strategy() -> impl Strategy<Value = Vec<CoverageBreakdownItem>> {
    prop::collection::vec(
        ("[A-Z][a-z]{2,12}", positive_amount_strategy())
            .prop_map(|(kind, amount)| CoverageBreakdownItem::new(kind, amount)),
        1..=5,
    )
}

/// Return reasons of acceptable length
pub fn valid_reason_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z ]{9,200}[a-z]"
}

/// Reasons that are too short once trimmed
pub fn short_reason_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z]{0,9}".prop_map(|s| format!("  {s}  "))
}
