//! Portal Application Layer
//!
//! Holds the state behind the portal's screens and wires the domain
//! validators to the backend ports:
//!
//! - **FormState**: field values, per-field errors, loading/success/error flags
//! - **ClaimValidation**: runs the claim validators and keeps their errors
//! - **ClaimActions**: validate, check the transition table, then call the port
//! - **ClaimsData**: the claims list, its filter, and dashboard statistics
//! - **UserForm**: the admin create/edit user form
//! - **cli**: the `portal` command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use interface_portal::ClaimActions;
//!
//! let mut actions = ClaimActions::new(Arc::new(claims_api), Role::HrOfficer);
//! match actions.forward_to_insurer(&claim, &data).await {
//!     Ok(updated) => println!("now {}", updated.status),
//!     Err(_) => println!("{:?} {:?}", actions.validation().errors(), actions.error()),
//! }
//! ```

pub mod config;
pub mod error;
pub mod form;
pub mod claim_validation;
pub mod claim_actions;
pub mod claims_data;
pub mod user_form;
pub mod cli;

pub use claim_actions::ClaimActions;
pub use claim_validation::ClaimValidation;
pub use claims_data::ClaimsData;
pub use config::PortalConfig;
pub use error::PortalError;
pub use form::FormState;
pub use user_form::UserForm;
