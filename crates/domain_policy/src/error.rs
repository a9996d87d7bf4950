//! Policy domain errors

use thiserror::Error;

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Unknown policy type
    #[error("Unknown policy type: {0}")]
    UnknownType(String),

    /// Unknown policy status
    #[error("Unknown policy status: {0}")]
    UnknownStatus(String),
}
