//! Custom Test Assertions
//!
//! Assertion helpers for field-keyed validation results that print the whole
//! error map on failure.

use rust_decimal::Decimal;

use core_kernel::{Money, ValidationResult};

/// Asserts that the result is valid
pub fn assert_valid(result: &ValidationResult) {
    assert!(
        result.is_valid(),
        "Expected no validation errors, got {:?}",
        result.errors
    );
}

/// Asserts that `field` has an error whose message contains `fragment`
pub fn assert_field_error(result: &ValidationResult, field: &str, fragment: &str) {
    match result.error_for(field) {
        Some(message) => assert!(
            message.contains(fragment),
            "Error for '{}' was '{}', expected it to contain '{}'",
            field,
            message,
            fragment
        ),
        None => panic!(
            "Expected an error for '{}', got errors {:?}",
            field, result.errors
        ),
    }
}

/// Asserts that `field` has no error
pub fn assert_no_field_error(result: &ValidationResult, field: &str) {
    assert!(
        !result.has_error(field),
        "Expected no error for '{}', got '{}'",
        field,
        result.error_for(field).unwrap_or_default()
    );
}

/// Asserts that exactly the given fields have errors
pub fn assert_error_fields(result: &ValidationResult, fields: &[&str]) {
    let mut actual: Vec<&str> = result.errors.keys().map(String::as_str).collect();
    let mut expected = fields.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "Unexpected error fields: {:?}", result.errors);
}

/// Asserts a money amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Expected {} {}, got {}",
        actual.currency().symbol(),
        expected,
        actual
    );
}
