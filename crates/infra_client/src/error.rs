//! Client error types
//!
//! Everything that can go wrong between issuing a request and handing a typed
//! value back to the caller. At the port boundary these become `PortError`.

use thiserror::Error;

use core_kernel::PortError;

use crate::storage::StorageError;

const SESSION_EXPIRED: &str = "Session expired, please sign in again";

/// Errors that can occur while calling the backend
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered 401; the session has already been cleared
    #[error("Session expired, please sign in again")]
    Unauthorized,

    /// The backend answered with a non-success status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request could not be sent or the body could not be read
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing the local session store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ClientError {
    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<ClientError> for PortError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Unauthorized => PortError::unauthorized(SESSION_EXPIRED),
            ClientError::Api { status, message } => PortError::rejected(status, message),
            ClientError::Http(e) => PortError::Connection {
                message: e.to_string(),
                source: Some(Box::new(e)),
            },
            ClientError::Decode(message) => PortError::transformation(message),
            ClientError::Storage(e) => PortError::internal(e.to_string()),
        }
    }
}
