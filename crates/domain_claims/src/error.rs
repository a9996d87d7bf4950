//! Claims domain errors

use thiserror::Error;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Unknown claim status: {0}")]
    UnknownStatus(String),

    #[error("Unknown claim type: {0}")]
    UnknownClaimType(String),

    #[error("A {role} cannot move a claim from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String, role: String },

    #[error("A {role} cannot {action} a claim that is in {status} status")]
    ActionNotPermitted { action: String, status: String, role: String },

    #[error("Claim already decided: {0}")]
    ClaimClosed(String),
}
