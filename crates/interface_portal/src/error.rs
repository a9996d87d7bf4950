//! Application error handling

use thiserror::Error;

use core_kernel::{PortError, ValidationResult};
use domain_claims::ClaimError;
use infra_client::{ClientError, StorageError};

/// Errors surfaced by the portal application layer
#[derive(Debug, Error)]
pub enum PortalError {
    /// Form input failed validation; nothing was sent to the backend
    #[error("Please correct the highlighted fields")]
    Validation(ValidationResult),

    /// The acting role may not perform the action in the claim's status
    #[error(transparent)]
    Workflow(#[from] ClaimError),

    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// No role is stored in the session
    #[error("Not signed in; run `portal session set` first")]
    NotSignedIn,

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PortalError {
    /// Field errors when this is a validation failure
    pub fn field_errors(&self) -> Option<&ValidationResult> {
        match self {
            PortalError::Validation(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, PortalError::Validation(_))
    }
}
