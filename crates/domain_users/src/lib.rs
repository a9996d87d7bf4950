//! User Management Domain
//!
//! This crate holds the portal's user directory types (administrators, HR
//! officers, insurance agents and employees with their dependents), the
//! checks the admin forms run before saving, and the port the application
//! layer uses to reach the backend.
//!
//! # Examples
//!
//! ```rust
//! use domain_users::user::UserForm;
//! use domain_users::validation::{FormMode, UserValidator};
//! use core_kernel::Role;
//!
//! let form = UserForm {
//!     first_name: "Nimal".to_string(),
//!     last_name: "Perera".to_string(),
//!     email: "nimal@example.lk".to_string(),
//!     role: Some(Role::HrOfficer),
//!     password: Some("long-enough".to_string()),
//!     ..Default::default()
//! };
//!
//! let result = UserValidator::validate_form(&form, FormMode::Create);
//! assert!(result.is_valid());
//! ```

pub mod user;
pub mod dependent;
pub mod validation;
pub mod ports;
pub mod error;

pub use dependent::{Dependent, Relationship};
pub use error::UserError;
pub use ports::{UserQuery, UsersPort};
pub use user::{StatusChange, User, UserForm, UserStats, UserStatus};
pub use validation::{FormMode, UserValidator};
