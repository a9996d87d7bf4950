//! User domain errors

use thiserror::Error;

/// Errors that can occur in the user domain
#[derive(Debug, Error)]
pub enum UserError {
    /// Unknown account status
    #[error("Unknown user status: {0}")]
    UnknownStatus(String),
}
