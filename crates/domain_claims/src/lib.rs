//! Claims Domain
//!
//! This crate mirrors the employee claim lifecycle as the portal sees it:
//! the claim snapshot, the role-keyed transition table, the validators run
//! before any workflow request, and the port the application layer calls.
//!
//! # Claim Lifecycle
//!
//! ```text
//! draft -> employee -> hr -> insurer -> approved/rejected
//! ```
//!
//! HR may return a claim from `hr` to `employee`, and the insurer may return
//! one from `insurer` to `hr`, each with a written reason.

pub mod claim;
pub mod workflow;
pub mod adjudication;
pub mod validation;
pub mod statistics;
pub mod ports;
pub mod error;

pub use adjudication::{DecisionRequest, ForwardToInsurerData, ReturnRequest};
pub use claim::{
    Claim, ClaimAmount, ClaimDocument, ClaimOption, ClaimStatus, ClaimType, CoverageBreakdownItem,
};
pub use error::ClaimError;
pub use ports::{ClaimQuery, ClaimsPort, DocumentContent};
pub use statistics::ClaimStatistics;
pub use validation::ClaimValidator;
pub use workflow::{allowed_next, return_target, ClaimAction};
