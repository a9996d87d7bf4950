//! Tests for domain_users

use chrono::NaiveDate;
use proptest::prelude::*;

use core_kernel::{Role, UserId};

use domain_users::dependent::{Dependent, Relationship};
use domain_users::user::{User, UserForm, UserStatus};
use domain_users::validation::{
    is_valid_email, is_valid_nic, is_valid_phone, FormMode, UserValidator,
};

fn hr_form() -> UserForm {
    UserForm {
        first_name: "Dilani".to_string(),
        last_name: "Fernando".to_string(),
        email: "dilani@example.lk".to_string(),
        role: Some(Role::HrOfficer),
        password: Some("password123".to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Form Tests
// ============================================================================

mod form_tests {
    use super::*;

    #[test]
    fn test_blank_form_reports_required_fields() {
        let result = UserValidator::validate_form(&UserForm::default(), FormMode::Create);

        assert_eq!(result.error_for("firstName"), Some("First name is required"));
        assert_eq!(result.error_for("lastName"), Some("Last name is required"));
        assert_eq!(result.error_for("email"), Some("Email is required"));
        assert_eq!(result.error_for("role"), Some("Role is required"));
        assert_eq!(result.error_for("password"), Some("Password is required"));
    }

    #[test]
    fn test_invalid_email() {
        let mut form = hr_form();
        form.email = "dilani-at-example".to_string();

        let result = UserValidator::validate_form(&form, FormMode::Create);
        assert_eq!(result.error_for("email"), Some("Please enter a valid email address"));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_short_password() {
        let mut form = hr_form();
        form.password = Some("short".to_string());

        let result = UserValidator::validate_form(&form, FormMode::Create);
        assert_eq!(
            result.error_for("password"),
            Some("Password must be at least 8 characters")
        );
    }

    #[test]
    fn test_employee_requires_employee_id() {
        let mut form = hr_form();
        form.role = Some(Role::Employee);
        form.employee_id = Some("   ".to_string());

        let result = UserValidator::validate_form(&form, FormMode::Create);
        assert!(result.has_error("employeeId"));

        form.employee_id = Some("EMP-1".to_string());
        assert!(UserValidator::validate_form(&form, FormMode::Create).is_valid());
    }

    #[test]
    fn test_blank_optional_fields_are_skipped() {
        let mut form = hr_form();
        form.nic = Some(String::new());
        form.phone_number = Some("  ".to_string());

        assert!(UserValidator::validate_form(&form, FormMode::Create).is_valid());
    }

    #[test]
    fn test_bad_nic_and_phone() {
        let mut form = hr_form();
        form.nic = Some("12345".to_string());
        form.phone_number = Some("12345".to_string());

        let result = UserValidator::validate_form(&form, FormMode::Update);
        assert!(result.has_error("nic"));
        assert_eq!(result.error_for("phoneNumber"), Some("Phone number must contain 10 digits"));
    }

    #[test]
    fn test_edit_form_round_trips_existing_user() {
        let user = User {
            id: UserId::new("64f0c2"),
            first_name: "Dilani".to_string(),
            last_name: "Fernando".to_string(),
            email: "dilani@example.lk".to_string(),
            role: Role::HrOfficer,
            status: UserStatus::Active,
            nic: Some("199045678901".to_string()),
            phone_number: Some("0711234567".to_string()),
            employee_id: None,
            department: Some("People".to_string()),
            dependents: Vec::new(),
            created_at: None,
        };

        let form = UserForm::from_user(&user);
        assert!(UserValidator::validate_form(&form, FormMode::Update).is_valid());
        assert!(UserValidator::validate_form(&form, FormMode::Create).has_error("password"));
    }
}

// ============================================================================
// Dependent Tests
// ============================================================================

mod dependent_tests {
    use super::*;

    #[test]
    fn test_dependent_wire_format() {
        let json = r#"{ "name": "Ruwan", "relationship": "spouse", "dateOfBirth": "1988-11-02" }"#;
        let dependent: Dependent = serde_json::from_str(json).unwrap();

        assert_eq!(dependent.relationship, Relationship::Spouse);
        assert_eq!(dependent.date_of_birth, NaiveDate::from_ymd_opt(1988, 11, 2).unwrap());
        assert!(dependent.age() >= 36);
    }

    #[test]
    fn test_dependent_with_bad_nic() {
        let dependent = Dependent {
            name: "Ruwan".to_string(),
            relationship: Relationship::Spouse,
            date_of_birth: NaiveDate::from_ymd_opt(1988, 11, 2).unwrap(),
            nic: Some("88110234".to_string()),
        };

        let result = UserValidator::validate_dependent(&dependent);
        assert!(result.has_error("nic"));
        assert!(!result.has_error("name"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptest_tests {
    use super::*;

    proptest! {
        #[test]
        fn test_old_nic_accepts_either_suffix(digits in "[0-9]{9}", suffix in "[vVxX]") {
            let nic = format!("{digits}{suffix}");
            prop_assert!(is_valid_nic(&nic));
        }

        #[test]
        fn test_new_nic_is_twelve_digits(digits in "[0-9]{12}") {
            prop_assert!(is_valid_nic(&digits));
            let longer = format!("{digits}0");
            prop_assert!(!is_valid_nic(&longer));
        }

        #[test]
        fn test_local_phone_numbers(rest in "[0-9]{9}") {
            let local = format!("0{rest}");
            prop_assert!(is_valid_phone(&local));
            let international = format!("+94{rest}");
            prop_assert!(is_valid_phone(&international));
        }

        #[test]
        fn test_email_without_at_sign_is_invalid(local in "[a-z]{1,12}", domain in "[a-z]{1,12}") {
            let with_dot = format!("{local}.{domain}");
            prop_assert!(!is_valid_email(&with_dot));
        }
    }
}
