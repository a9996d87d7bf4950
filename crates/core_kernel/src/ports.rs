//! Port error type shared by every domain port
//!
//! Domain crates declare async port traits (`ClaimsPort`, `UsersPort`) that
//! the application layer calls. The REST adapters in `infra_client` and the
//! in-memory fakes in `test_utils` both implement them, and both report
//! failures through `PortError`.
//!
//! ```text
//!   interface_portal ──calls──> ClaimsPort / UsersPort
//!                                    ▲            ▲
//!                     infra_client (REST)    test_utils (in-memory)
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The session is missing or was rejected by the backend
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// The backend refused the request with a non-success status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Connection to the backend failed
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered with a payload that could not be interpreted
    #[error("Transformation error: {message}")]
    Transformation { message: String },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        PortError::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates a Rejected error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        PortError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a Transformation error
    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. } | PortError::Rejected { status: 404, .. })
    }

    /// Returns true if the session has to be re-established
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, PortError::Unauthorized { .. })
    }
}
