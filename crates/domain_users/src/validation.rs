//! User validation rules
//!
//! This module validates the admin portal's user and dependent forms before
//! they are sent to the backend.
//!
//! # Validation Rules
//!
//! ## Users
//! - First name, last name and email are required
//! - Email must be a valid address
//! - A role must be chosen
//! - New users need a password of at least 8 characters
//! - Employees need an employee number
//! - NIC, when given, is 9 digits followed by V or X, or 12 digits
//! - Phone number, when given, has exactly 10 digits
//!
//! ## Dependents
//! - Name is required
//! - Date of birth cannot be in the future
//! - NIC, when given, follows the user NIC format

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidateEmail;

use core_kernel::{Role, ValidationResult};

use crate::dependent::Dependent;
use crate::user::UserForm;

/// Minimum password length for new accounts
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Digits in a local phone number
pub const PHONE_DIGITS: usize = 10;

static NIC_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[0-9]{9}[vVxX]|[0-9]{12})$").expect("NIC pattern compiles"));

/// Whether the user form is creating a new account or editing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Checks the national identity card number format
///
/// Old cards carry 9 digits and a trailing `V` or `X`; new cards carry
/// 12 digits.
pub fn is_valid_nic(nic: &str) -> bool {
    NIC_PATTERN.is_match(nic.trim())
}

/// Reduces a phone number to its digits, mapping the `+94` country code to
/// a leading `0`
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let local = match trimmed.strip_prefix("+94") {
        Some(rest) => format!("0{rest}"),
        None => trimmed.to_string(),
    };
    local.chars().filter(char::is_ascii_digit).collect()
}

/// Checks that a phone number has exactly ten digits and nothing but
/// digits, spaces, dashes and a leading `+94`
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    let body = trimmed.strip_prefix("+94").unwrap_or(trimmed);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    allowed && normalize_phone(phone).len() == PHONE_DIGITS
}

/// Checks an email address
pub fn is_valid_email(email: &str) -> bool {
    email.trim().to_string().validate_email()
}

/// Validator for user forms
pub struct UserValidator;

impl UserValidator {
    /// Validates the create/edit user form
    ///
    /// # Arguments
    ///
    /// * `form` - The values entered in the form
    /// * `mode` - Whether a new account is being created
    pub fn validate_form(form: &UserForm, mode: FormMode) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if form.first_name.trim().is_empty() {
            result.add_error("firstName", "First name is required");
        }
        if form.last_name.trim().is_empty() {
            result.add_error("lastName", "Last name is required");
        }

        if form.email.trim().is_empty() {
            result.add_error("email", "Email is required");
        } else if !is_valid_email(&form.email) {
            result.add_error("email", "Please enter a valid email address");
        }

        match form.role {
            None => result.add_error("role", "Role is required"),
            Some(Role::Employee) => {
                let missing = form
                    .employee_id
                    .as_deref()
                    .map_or(true, |id| id.trim().is_empty());
                if missing {
                    result.add_error("employeeId", "Employee ID is required for employees");
                }
            }
            Some(_) => {}
        }

        if mode == FormMode::Create {
            match form.password.as_deref() {
                None | Some("") => result.add_error("password", "Password is required"),
                Some(password) if password.chars().count() < PASSWORD_MIN_CHARS => {
                    result.add_error(
                        "password",
                        format!("Password must be at least {PASSWORD_MIN_CHARS} characters"),
                    );
                }
                Some(_) => {}
            }
        }

        if let Some(nic) = non_blank(form.nic.as_deref()) {
            if !is_valid_nic(nic) {
                result.add_error("nic", "NIC must be 9 digits followed by V or X, or 12 digits");
            }
        }

        if let Some(phone) = non_blank(form.phone_number.as_deref()) {
            if !is_valid_phone(phone) {
                result.add_error("phoneNumber", "Phone number must contain 10 digits");
            }
        }

        for (index, dependent) in form.dependents.iter().enumerate() {
            result.merge_prefixed(
                &format!("dependents[{index}]"),
                Self::validate_dependent(dependent),
            );
        }

        result
    }

    /// Validates a single dependent
    pub fn validate_dependent(dependent: &Dependent) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if dependent.name.trim().is_empty() {
            result.add_error("name", "Dependent name is required");
        }

        let today = Utc::now().date_naive();
        if dependent.date_of_birth > today {
            result.add_error("dateOfBirth", "Date of birth cannot be in the future");
        }

        if let Some(nic) = non_blank(dependent.nic.as_deref()) {
            if !is_valid_nic(nic) {
                result.add_error("nic", "NIC must be 9 digits followed by V or X, or 12 digits");
            }
        }

        result
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
