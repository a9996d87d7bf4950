//! Core Kernel - Foundational types shared by the portal crates
//!
//! This crate provides the building blocks used across all domain modules:
//! - Opaque backend identifiers wrapped in typed newtypes
//! - Money types with precise decimal arithmetic
//! - Portal user roles
//! - Field-keyed validation results for form validators
//! - The error type reported by domain ports

pub mod money;
pub mod identifiers;
pub mod roles;
pub mod validation;
pub mod ports;
pub mod error;

pub use error::CoreError;
pub use identifiers::{ClaimId, DocumentId, IdError, PolicyId, UserId};
pub use money::{Currency, Money};
pub use ports::PortError;
pub use roles::Role;
pub use validation::ValidationResult;
