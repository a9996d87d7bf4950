//! Comprehensive tests for domain_claims

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, Role};

use domain_claims::adjudication::{DecisionRequest, ForwardToInsurerData};
use domain_claims::claim::{Claim, ClaimOption, ClaimStatus, ClaimType, CoverageBreakdownItem};
use domain_claims::validation::{fields, ClaimValidator};
use domain_claims::workflow::{allowed_next, ensure_transition, return_target, TRANSITIONS};

fn create_test_claim(status: ClaimStatus, requested: Decimal) -> Claim {
    let mut claim = Claim::draft(
        ClaimId::new("66a1f0c2e4b0a1b2c3d4e5f6"),
        ClaimType::Life,
        ClaimOption::Hospitalization,
        requested,
    );
    claim.status = status;
    claim
}

// ============================================================================
// Forward To Insurer Tests
// ============================================================================

mod forward_tests {
    use super::*;

    #[test]
    fn test_breakdown_over_requested_amount_is_rejected() {
        let claim = create_test_claim(ClaimStatus::Hr, dec!(1000));
        let data = ForwardToInsurerData::new(vec![
            CoverageBreakdownItem::new("Medical Expenses", dec!(600)),
            CoverageBreakdownItem::new("Hospitalization", dec!(500)),
        ]);

        let result = ClaimValidator::validate_forward_to_insurer(&data, &claim);

        assert!(!result.is_valid());
        let message = result.error_for(fields::TOTAL).expect("total error");
        assert!(message.contains("1000"), "message was: {message}");
        assert!(message.contains("1100"), "message was: {message}");
    }

    #[test]
    fn test_missing_coverage_type_is_a_per_item_error() {
        let claim = create_test_claim(ClaimStatus::Hr, dec!(1000));
        let data = ForwardToInsurerData::new(vec![
            CoverageBreakdownItem::new("Medical Expenses", dec!(100)),
            CoverageBreakdownItem::new("  ", dec!(100)),
        ]);

        let result = ClaimValidator::validate_forward_to_insurer(&data, &claim);

        assert!(!result.is_valid());
        assert!(result.has_error("coverageBreakdown[1].coverageType"));
        assert!(!result.has_error("coverageBreakdown[0].coverageType"));
    }

    #[test]
    fn test_non_positive_amounts_are_per_item_errors() {
        let claim = create_test_claim(ClaimStatus::Hr, dec!(1000));
        let data = ForwardToInsurerData::new(vec![
            CoverageBreakdownItem::new("Medical Expenses", dec!(0)),
            CoverageBreakdownItem::new("Hospitalization", dec!(-5)),
        ]);

        let result = ClaimValidator::validate_forward_to_insurer(&data, &claim);

        assert!(result.has_error("coverageBreakdown[0].requestedAmount"));
        assert!(result.has_error("coverageBreakdown[1].requestedAmount"));
        assert!(!result.has_error(fields::TOTAL));
    }

    #[test]
    fn test_valid_forward() {
        let claim = create_test_claim(ClaimStatus::Hr, dec!(1000));
        let data = ForwardToInsurerData::new(vec![
            CoverageBreakdownItem::new("Medical Expenses", dec!(600)),
            CoverageBreakdownItem::new("Hospitalization", dec!(399.99)),
        ])
        .with_notes("Receipts verified against the policy schedule");

        let result = ClaimValidator::validate_forward_to_insurer(&data, &claim);
        assert!(result.is_valid(), "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_notes_at_limit_pass() {
        let claim = create_test_claim(ClaimStatus::Hr, dec!(1000));
        let item = CoverageBreakdownItem::new("Medical Expenses", dec!(1));
        let data = ForwardToInsurerData::new(vec![item]).with_notes("x".repeat(1000));
        assert!(ClaimValidator::validate_forward_to_insurer(&data, &claim).is_valid());
    }
}

// ============================================================================
// Return Tests
// ============================================================================

mod return_tests {
    use super::*;

    #[test]
    fn test_empty_and_short_reasons_fail() {
        assert!(!ClaimValidator::validate_return_reason("").is_valid());
        assert!(!ClaimValidator::validate_return_reason("short").is_valid());
    }

    #[test]
    fn test_reason_length_limits() {
        assert!(ClaimValidator::validate_return_reason(&"a".repeat(500)).is_valid());
        assert!(!ClaimValidator::validate_return_reason(&"a".repeat(501)).is_valid());
    }

    #[test]
    fn test_reason_is_measured_after_trimming() {
        let padded = format!("   {}   ", "a".repeat(9));
        let result = ClaimValidator::validate_return_reason(&padded);
        assert!(result.error_for(fields::REASON).unwrap().contains("at least 10"));
    }

    #[test]
    fn test_hr_may_only_return_claims_under_review() {
        for status in ClaimStatus::ALL {
            let claim = create_test_claim(status, dec!(100));
            let result = ClaimValidator::validate_claim_for_return(&claim, Role::HrOfficer);
            assert_eq!(result.is_valid(), status == ClaimStatus::Hr, "status {status}");
        }
    }

    #[test]
    fn test_insurer_may_only_return_claims_it_holds() {
        for status in ClaimStatus::ALL {
            let claim = create_test_claim(status, dec!(100));
            let result = ClaimValidator::validate_claim_for_return(&claim, Role::InsuranceAgent);
            assert_eq!(result.is_valid(), status == ClaimStatus::Insurer, "status {status}");
        }
    }

    #[test]
    fn test_employees_and_admins_never_return() {
        for role in [Role::Employee, Role::Admin] {
            for status in ClaimStatus::ALL {
                let claim = create_test_claim(status, dec!(100));
                assert!(!ClaimValidator::validate_claim_for_return(&claim, role).is_valid());
            }
        }
    }
}

// ============================================================================
// Decision Tests
// ============================================================================

mod decision_tests {
    use super::*;

    #[test]
    fn test_approval_requires_positive_amount() {
        assert!(!ClaimValidator::validate_decision(&DecisionRequest::approve(dec!(0))).is_valid());
        assert!(ClaimValidator::validate_decision(&DecisionRequest::approve(dec!(100))).is_valid());
    }

    #[test]
    fn test_approval_without_amount_fails() {
        let decision = DecisionRequest {
            status: ClaimStatus::Approved,
            approved_amount: None,
            rejection_reason: None,
            insurer_notes: None,
        };
        let result = ClaimValidator::validate_decision(&decision);
        assert!(result.has_error(fields::APPROVED_AMOUNT));
    }

    #[test]
    fn test_rejection_requires_reason() {
        let decision = DecisionRequest {
            status: ClaimStatus::Rejected,
            approved_amount: None,
            rejection_reason: None,
            insurer_notes: None,
        };
        assert!(!ClaimValidator::validate_decision(&decision).is_valid());
        let rejection = DecisionRequest::reject("Not covered by policy");
        assert!(ClaimValidator::validate_decision(&rejection).is_valid());
    }

    #[test]
    fn test_decision_notes_limit() {
        let decision = DecisionRequest::approve(dec!(10)).with_notes("n".repeat(1001));
        assert!(ClaimValidator::validate_decision(&decision).has_error(fields::INSURER_NOTES));
    }
}

// ============================================================================
// Workflow Tests
// ============================================================================

mod workflow_tests {
    use super::*;

    #[test]
    fn test_happy_path_is_walkable() {
        let path = [
            (ClaimStatus::Draft, ClaimStatus::Employee, Role::Employee),
            (ClaimStatus::Employee, ClaimStatus::Hr, Role::HrOfficer),
            (ClaimStatus::Hr, ClaimStatus::Insurer, Role::HrOfficer),
            (ClaimStatus::Insurer, ClaimStatus::Approved, Role::InsuranceAgent),
        ];
        for (from, to, role) in path {
            assert!(ensure_transition(from, to, role).is_ok(), "{from} -> {to} as {role}");
        }
    }

    #[test]
    fn test_every_return_goes_backwards() {
        let order = |s: ClaimStatus| ClaimStatus::ALL.iter().position(|x| *x == s).unwrap();
        for t in TRANSITIONS {
            if let Some(target) = return_target(t.from, t.role) {
                assert!(order(target) < order(t.from));
            }
        }
    }

    #[test]
    fn test_wrong_role_cannot_forward() {
        assert!(allowed_next(ClaimStatus::Hr, Role::Employee).is_empty());
        let by_agent =
            ensure_transition(ClaimStatus::Hr, ClaimStatus::Insurer, Role::InsuranceAgent);
        assert!(by_agent.is_err());
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn breakdown_over_limit_always_has_total_error(
            requested_cents in 1i64..10_000_000i64,
            parts in proptest::collection::vec(1i64..5_000_000i64, 1..8),
        ) {
            let requested = Decimal::new(requested_cents, 2);
            let items: Vec<CoverageBreakdownItem> = parts
                .iter()
                .enumerate()
                .map(|(i, cents)| {
                    CoverageBreakdownItem::new(format!("Coverage {i}"), Decimal::new(*cents, 2))
                })
                .collect();
            let data = ForwardToInsurerData::new(items);
            let claim = create_test_claim(ClaimStatus::Hr, requested);

            let result = ClaimValidator::validate_forward_to_insurer(&data, &claim);
            let over = data.total_requested() > requested;

            prop_assert_eq!(result.has_error(fields::TOTAL), over);
            prop_assert_eq!(result.is_valid(), !over);
        }

        #[test]
        fn return_reason_validity_tracks_length(len in 0usize..700) {
            let reason = "r".repeat(len);
            let valid = ClaimValidator::validate_return_reason(&reason).is_valid();
            prop_assert_eq!(valid, (10..=500).contains(&len));
        }
    }
}
