//! Tests for domain_policy

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{PolicyId, UserId};

use domain_policy::policy::{Policy, PolicyForm, PolicyStatus, PolicyType};
use domain_policy::statistics::PolicyStatistics;
use domain_policy::validation::PolicyValidator;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_test_form() -> PolicyForm {
    PolicyForm {
        policy_number: "VEH-2024-017".to_string(),
        policy_type: PolicyType::Vehicle,
        coverage_amount: dec!(2500000),
        premium: dec!(45000),
        start_date: date(2024, 4, 1),
        end_date: date(2025, 3, 31),
        status: None,
        insurance_agent: Some(UserId::new("agent-1")),
        beneficiaries: vec![UserId::new("emp-1")],
        description: None,
    }
}

fn create_test_policy(
    id: &str,
    policy_type: PolicyType,
    status: PolicyStatus,
    coverage: Decimal,
) -> Policy {
    Policy {
        id: PolicyId::new(id),
        policy_number: format!("NO-{id}"),
        policy_type,
        status,
        coverage_amount: coverage,
        premium: dec!(100),
        currency: Default::default(),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
        insurance_agent: None,
        beneficiaries: Vec::new(),
        description: None,
        created_at: None,
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_valid_form() {
        let result = PolicyValidator::validate_form(&create_test_form());
        assert!(result.is_valid(), "Errors: {:?}", result.errors);
    }

    #[test]
    fn test_missing_number_and_zero_amounts() {
        let mut form = create_test_form();
        form.policy_number = "  ".to_string();
        form.coverage_amount = Decimal::ZERO;
        form.premium = dec!(-1);

        let result = PolicyValidator::validate_form(&form);
        assert_eq!(result.error_for("policyNumber"), Some("Policy number is required"));
        assert!(result.has_error("coverageAmount"));
        assert!(result.has_error("premium"));
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_end_date_must_follow_start_date() {
        let mut form = create_test_form();
        form.end_date = form.start_date;

        let result = PolicyValidator::validate_form(&form);
        assert_eq!(result.error_for("endDate"), Some("End date must be after start date"));
    }

    #[test]
    fn test_long_description() {
        let mut form = create_test_form();
        form.description = Some("x".repeat(1001));
        assert!(PolicyValidator::validate_form(&form).has_error("description"));

        form.description = Some("x".repeat(1000));
        assert!(PolicyValidator::validate_form(&form).is_valid());
    }

    #[test]
    fn test_form_from_policy_keeps_status() {
        let policy = create_test_policy("p9", PolicyType::Life, PolicyStatus::Pending, dec!(10));
        let form = PolicyForm::from_policy(&policy);
        assert_eq!(form.status, Some(PolicyStatus::Pending));

        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["policyNumber"], "NO-p9");
        assert!(json.get("beneficiaries").is_none());
    }
}

mod statistics_tests {
    use super::*;

    #[test]
    fn test_local_statistics() {
        let policies = vec![
            create_test_policy("a", PolicyType::Life, PolicyStatus::Active, dec!(1000)),
            create_test_policy("b", PolicyType::Vehicle, PolicyStatus::Active, dec!(500)),
            create_test_policy("c", PolicyType::Life, PolicyStatus::Expired, dec!(9000)),
        ];

        let stats = PolicyStatistics::from_policies(&policies);
        assert_eq!(stats.total_policies, 3);
        assert_eq!(stats.active_policies, 2);
        assert_eq!(stats.of_type(PolicyType::Life), 2);
        assert_eq!(stats.total_coverage, dec!(1500));
        assert_eq!(stats.total_premium, dec!(200));
    }

    #[test]
    fn test_backend_statistics_with_missing_fields() {
        let json = r#"{ "totalPolicies": 4, "byType": { "vehicle": 4 } }"#;
        let stats: PolicyStatistics = serde_json::from_str(json).unwrap();
        assert_eq!(stats.of_type(PolicyType::Vehicle), 4);
        assert_eq!(stats.active_policies, 0);
        assert_eq!(stats.total_coverage, Decimal::ZERO);
    }
}

mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_positive_amounts_pass(coverage in 1i64..10_000_000, premium in 1i64..1_000_000) {
            let mut form = create_test_form();
            form.coverage_amount = Decimal::new(coverage, 2);
            form.premium = Decimal::new(premium, 2);
            prop_assert!(PolicyValidator::validate_form(&form).is_valid());
        }

        #[test]
        fn test_end_before_start_fails(days in 0u64..3650) {
            let mut form = create_test_form();
            form.end_date = form.start_date - chrono::Days::new(days);
            prop_assert!(PolicyValidator::validate_form(&form).has_error("endDate"));
        }
    }
}
