//! Claims endpoints
//!
//! Wraps `/claims` and implements `ClaimsPort` over it.

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, instrument};

use core_kernel::{ClaimId, DocumentId, PortError};
use domain_claims::{
    Claim, ClaimQuery, ClaimStatus, ClaimsPort, DecisionRequest, DocumentContent,
    ForwardToInsurerData, ReturnRequest,
};

use crate::client::{ApiClient, Blob};
use crate::error::ClientError;

#[derive(Serialize)]
struct StatusUpdate {
    status: ClaimStatus,
}

#[derive(Serialize)]
struct EmptyBody {}

/// Client for the claims resource
#[derive(Debug, Clone)]
pub struct ClaimsApi {
    client: ApiClient,
}

impl ClaimsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /claims`
    pub async fn list(&self, query: &ClaimQuery) -> Result<Vec<Claim>, ClientError> {
        self.client.get_with_query("claims", query).await
    }

    /// `GET /claims/:id`
    pub async fn get(&self, id: &ClaimId) -> Result<Claim, ClientError> {
        self.client.get(&format!("claims/{id}")).await
    }

    /// `POST /claims/:id/submit`
    pub async fn submit(&self, id: &ClaimId) -> Result<Claim, ClientError> {
        self.client.post(&format!("claims/{id}/submit"), &EmptyBody {}).await
    }

    /// `PATCH /claims/:id` moving the claim into HR review
    pub async fn review(&self, id: &ClaimId) -> Result<Claim, ClientError> {
        let body = StatusUpdate {
            status: ClaimStatus::Hr,
        };
        self.client.patch(&format!("claims/{id}"), &body).await
    }

    /// `POST /claims/:id/forward`
    pub async fn forward(
        &self,
        id: &ClaimId,
        data: &ForwardToInsurerData,
    ) -> Result<Claim, ClientError> {
        self.client.post(&format!("claims/{id}/forward"), data).await
    }

    /// `POST /claims/:id/return`
    pub async fn send_back(
        &self,
        id: &ClaimId,
        request: &ReturnRequest,
    ) -> Result<Claim, ClientError> {
        self.client.post(&format!("claims/{id}/return"), request).await
    }

    /// `POST /claims/:id/decision`
    pub async fn record_decision(
        &self,
        id: &ClaimId,
        decision: &DecisionRequest,
    ) -> Result<Claim, ClientError> {
        self.client.post(&format!("claims/{id}/decision"), decision).await
    }

    /// `GET /claims/:id/documents/:documentId`
    pub async fn document(&self, id: &ClaimId, document: &DocumentId) -> Result<Blob, ClientError> {
        self.client.get_blob(&format!("claims/{id}/documents/{document}")).await
    }
}

#[async_trait]
impl ClaimsPort for ClaimsApi {
    #[instrument(skip(self))]
    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        Ok(self.list(query).await?)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn get_claim(&self, id: &ClaimId) -> Result<Claim, PortError> {
        Ok(self.get(id).await?)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn submit_claim(&self, id: &ClaimId) -> Result<Claim, PortError> {
        let claim = self.submit(id).await?;
        info!(status = %claim.status, "Claim submitted");
        Ok(claim)
    }

    #[instrument(skip(self), fields(claim_id = %id))]
    async fn start_review(&self, id: &ClaimId) -> Result<Claim, PortError> {
        let claim = self.review(id).await?;
        info!(status = %claim.status, "Claim review started");
        Ok(claim)
    }

    #[instrument(skip(self, data), fields(claim_id = %id, items = data.coverage_breakdown.len()))]
    async fn forward_to_insurer(
        &self,
        id: &ClaimId,
        data: &ForwardToInsurerData,
    ) -> Result<Claim, PortError> {
        let claim = self.forward(id, data).await?;
        info!(status = %claim.status, "Claim forwarded to insurer");
        Ok(claim)
    }

    #[instrument(skip(self, request), fields(claim_id = %id))]
    async fn return_claim(
        &self,
        id: &ClaimId,
        request: &ReturnRequest,
    ) -> Result<Claim, PortError> {
        let claim = self.send_back(id, request).await?;
        info!(status = %claim.status, "Claim returned");
        Ok(claim)
    }

    #[instrument(skip(self, decision), fields(claim_id = %id, decision = %decision.status))]
    async fn decide(&self, id: &ClaimId, decision: &DecisionRequest) -> Result<Claim, PortError> {
        let claim = self.record_decision(id, decision).await?;
        info!(status = %claim.status, "Claim decided");
        Ok(claim)
    }

    #[instrument(skip(self), fields(claim_id = %id, document_id = %document))]
    async fn download_document(
        &self,
        id: &ClaimId,
        document: &DocumentId,
    ) -> Result<DocumentContent, PortError> {
        let blob = self.document(id, document).await?;
        Ok(DocumentContent {
            bytes: blob.bytes,
            content_type: blob.content_type,
            filename: blob.filename,
        })
    }
}
