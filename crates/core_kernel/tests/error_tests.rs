//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::{ClaimId, IdError, PortError, Role};

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_from_id_error() {
    let id_error = ClaimId::parse("").unwrap_err();
    let core_error: CoreError = id_error.into();

    assert!(matches!(core_error, CoreError::Id(IdError::Empty { entity: "claim" })));
    assert_eq!(core_error.to_string(), "Identifier error: claim id cannot be empty");
}

#[test]
fn test_unknown_role_is_a_validation_error() {
    let error = "auditor".parse::<Role>().unwrap_err();
    assert!(matches!(error, CoreError::Validation(_)));
}

#[test]
fn test_port_error_display() {
    let error = PortError::not_found("claim", ClaimId::new("c1"));
    assert_eq!(error.to_string(), "Not found: claim with id c1");
}
