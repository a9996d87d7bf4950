//! Strongly-typed identifiers for backend entities
//!
//! The backend issues opaque string identifiers (document ids). Wrapping them
//! in newtypes keeps a `ClaimId` from being passed where a `UserId` is
//! expected, and guarantees every id is safe to splice into a URL path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing an identifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("{entity} id cannot be empty")]
    Empty { entity: &'static str },

    #[error("{entity} id contains invalid character {found:?}")]
    InvalidCharacter { entity: &'static str, found: char },
}

fn check_id(entity: &'static str, raw: &str) -> Result<(), IdError> {
    if raw.is_empty() {
        return Err(IdError::Empty { entity });
    }
    match raw.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_')) {
        Some(found) => Err(IdError::InvalidCharacter { entity, found }),
        None => Ok(()),
    }
}

macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a backend-issued identifier without checking it
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parses and checks an identifier typed by a user
            pub fn parse(raw: &str) -> Result<Self, IdError> {
                let trimmed = raw.trim();
                check_id($entity, trimmed)?;
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the entity name used in messages
            pub fn entity() -> &'static str {
                $entity
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(ClaimId, "claim");
define_id!(DocumentId, "document");
define_id!(UserId, "user");
define_id!(PolicyId, "policy");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_id_display_is_raw() {
        let id = ClaimId::new("64f1a2b3c4d5e6f7a8b9c0d1");
        assert_eq!(id.to_string(), "64f1a2b3c4d5e6f7a8b9c0d1");
    }

    #[test]
    fn test_id_parsing_trims() {
        let parsed: UserId = "  abc123 ".parse().unwrap();
        assert_eq!(parsed.as_str(), "abc123");
    }

    #[test]
    fn test_id_parsing_rejects_empty() {
        assert_eq!(
            PolicyId::parse("   "),
            Err(IdError::Empty { entity: "policy" })
        );
    }

    #[test]
    fn test_id_parsing_rejects_path_separators() {
        let err = ClaimId::parse("abc/../users").unwrap_err();
        assert!(matches!(err, IdError::InvalidCharacter { found: '/', .. }));
    }

    #[test]
    fn test_id_serializes_transparently() {
        let id = DocumentId::new("doc-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"doc-1\"");
    }
}
