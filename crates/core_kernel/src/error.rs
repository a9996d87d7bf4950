//! Core error types used across the system

use thiserror::Error;

use crate::identifiers::IdError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Identifier error: {0}")]
    Id(#[from] IdError),

    /// Input that does not name a known value, e.g. an unknown role
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
