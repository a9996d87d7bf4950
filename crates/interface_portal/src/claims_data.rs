//! Claims list state
//!
//! Loads claims through the port, keeps the active filter, and recomputes
//! the dashboard statistics whenever the list changes.

use std::sync::Arc;
use tracing::{debug, warn};

use core_kernel::ClaimId;
use domain_claims::{Claim, ClaimQuery, ClaimStatistics, ClaimStatus, ClaimsPort};

use crate::error::PortalError;

pub struct ClaimsData<P> {
    port: Arc<P>,
    query: ClaimQuery,
    claims: Vec<Claim>,
    statistics: ClaimStatistics,
    loading: bool,
    error: Option<String>,
}

impl<P: ClaimsPort> ClaimsData<P> {
    pub fn new(port: Arc<P>) -> Self {
        Self {
            port,
            query: ClaimQuery::default(),
            claims: Vec::new(),
            statistics: ClaimStatistics::default(),
            loading: false,
            error: None,
        }
    }

    pub fn query(&self) -> &ClaimQuery {
        &self.query
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    pub fn statistics(&self) -> &ClaimStatistics {
        &self.statistics
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reloads with the current filter
    ///
    /// On failure the previous list is kept and the error is shown.
    pub async fn load(&mut self) -> Result<(), PortalError> {
        self.loading = true;
        self.error = None;
        let result = self.port.list_claims(&self.query).await;
        self.loading = false;

        match result {
            Ok(claims) => {
                debug!(count = claims.len(), "Loaded claims");
                self.set_claims(claims);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load claims");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Changes the filter and reloads
    pub async fn apply_filter(&mut self, query: ClaimQuery) -> Result<(), PortalError> {
        self.query = query;
        self.load().await
    }

    pub fn get(&self, id: &ClaimId) -> Option<&Claim> {
        self.claims.iter().find(|claim| &claim.id == id)
    }

    pub fn with_status(&self, status: ClaimStatus) -> Vec<&Claim> {
        self.claims.iter().filter(|claim| claim.status == status).collect()
    }

    /// Case-insensitive match on claim number and description
    pub fn search(&self, term: &str) -> Vec<&Claim> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.claims.iter().collect();
        }
        self.claims
            .iter()
            .filter(|claim| {
                [claim.claim_number.as_deref(), claim.description.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Swaps in a claim returned by a workflow action
    ///
    /// A claim that no longer matches the filter drops out of the list.
    pub fn replace(&mut self, updated: Claim) {
        let position = self.claims.iter().position(|claim| claim.id == updated.id);
        match (position, self.query.matches(&updated)) {
            (Some(index), true) => self.claims[index] = updated,
            (Some(index), false) => {
                self.claims.remove(index);
            }
            (None, true) => self.claims.push(updated),
            (None, false) => {}
        }
        self.statistics = ClaimStatistics::from_claims(&self.claims);
    }

    fn set_claims(&mut self, claims: Vec<Claim>) {
        self.statistics = ClaimStatistics::from_claims(&claims);
        self.claims = claims;
    }
}
