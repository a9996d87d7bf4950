//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the portal
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built claims, users, policies and backend envelopes
//! - `builders`: Builder patterns for test data construction
//! - `fakes`: In-memory `ClaimsPort` / `UsersPort` and a recording navigator
//! - `mock_backend`: A throwaway HTTP backend serving canned responses
//! - `assertions`: Assertion helpers for validation results
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod fakes;
pub mod mock_backend;
pub mod assertions;
pub mod generators;

pub use assertions::*;
pub use builders::*;
pub use fakes::*;
pub use fixtures::*;
pub use generators::*;
pub use mock_backend::*;
