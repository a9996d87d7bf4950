//! Claims Domain Ports
//!
//! `ClaimsPort` is everything the application layer needs from the claims
//! backend. The REST adapter in `infra_client` implements it against
//! `/api/v1/claims`; `test_utils` provides an in-memory implementation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_claims::ports::{ClaimsPort, ClaimQuery};
//! use std::sync::Arc;
//!
//! pub struct ClaimsScreen {
//!     claims: Arc<dyn ClaimsPort>,
//! }
//!
//! impl ClaimsScreen {
//!     pub async fn pending_review(&self) -> Result<Vec<Claim>, PortError> {
//!         self.claims.list_claims(&ClaimQuery::by_status(ClaimStatus::Hr)).await
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;

use core_kernel::{ClaimId, DocumentId, PortError};

use crate::adjudication::{DecisionRequest, ForwardToInsurerData, ReturnRequest};
use crate::claim::{Claim, ClaimStatus, ClaimType};

/// Query parameters for listing claims
///
/// Serialized as the query string of `GET /claims`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimQuery {
    /// Filter by status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClaimStatus>,
    /// Filter by claim type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_type: Option<ClaimType>,
    /// Free-text search over claim number and employee name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page number, starting at 1
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ClaimQuery {
    /// Creates a query to find by status
    pub fn by_status(status: ClaimStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Whether a claim satisfies the status and type filters
    ///
    /// Free-text search is left to the backend.
    pub fn matches(&self, claim: &Claim) -> bool {
        self.status.map_or(true, |status| claim.status == status)
            && self.claim_type.map_or(true, |claim_type| claim.claim_type == claim_type)
    }
}

/// Downloaded binary content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    pub filename: Option<String>,
}

/// Port for the claims backend
#[async_trait]
pub trait ClaimsPort: Send + Sync {
    /// Lists claims matching a query
    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError>;

    /// Fetches a single claim
    async fn get_claim(&self, id: &ClaimId) -> Result<Claim, PortError>;

    /// Lodges a draft claim (`draft → employee`)
    async fn submit_claim(&self, id: &ClaimId) -> Result<Claim, PortError>;

    /// Picks up a lodged claim for HR review (`employee → hr`)
    async fn start_review(&self, id: &ClaimId) -> Result<Claim, PortError>;

    /// Forwards a reviewed claim to the insurer (`hr → insurer`)
    async fn forward_to_insurer(
        &self,
        id: &ClaimId,
        data: &ForwardToInsurerData,
    ) -> Result<Claim, PortError>;

    /// Returns a claim one stage back
    async fn return_claim(&self, id: &ClaimId, request: &ReturnRequest) -> Result<Claim, PortError>;

    /// Records the insurer's decision
    async fn decide(&self, id: &ClaimId, decision: &DecisionRequest) -> Result<Claim, PortError>;

    /// Downloads a supporting document
    async fn download_document(
        &self,
        id: &ClaimId,
        document_id: &DocumentId,
    ) -> Result<DocumentContent, PortError>;
}
