//! Policy Domain
//!
//! Group life and vehicle policies held by the company on behalf of its
//! employees. The portal lists and edits them, shows the statistics block on
//! the dashboard, and checks the policy form before it is saved.
//!
//! # Policy Status
//!
//! ```text
//! pending -> active -> expired
//!                  \-> inactive
//!                  \-> cancelled
//! ```
//!
//! Status changes are decided by the backend; the portal only displays them.

pub mod policy;
pub mod statistics;
pub mod validation;
pub mod error;

pub use error::PolicyError;
pub use policy::{Policy, PolicyForm, PolicyQuery, PolicyStatus, PolicyType};
pub use statistics::PolicyStatistics;
pub use validation::PolicyValidator;
