//! Policy endpoints

use core_kernel::PolicyId;
use domain_policy::{Policy, PolicyForm, PolicyQuery, PolicyStatistics};

use crate::client::{ApiAck, ApiClient};
use crate::error::ClientError;

/// Client for the policies resource
#[derive(Debug, Clone)]
pub struct PoliciesApi {
    client: ApiClient,
}

impl PoliciesApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /policies`
    pub async fn list(&self, query: &PolicyQuery) -> Result<Vec<Policy>, ClientError> {
        self.client.get_with_query("policies", query).await
    }

    /// `GET /policies/:id`
    pub async fn get(&self, id: &PolicyId) -> Result<Policy, ClientError> {
        self.client.get(&format!("policies/{id}")).await
    }

    /// `POST /policies`
    pub async fn create(&self, form: &PolicyForm) -> Result<Policy, ClientError> {
        self.client.post("policies", form).await
    }

    /// `PATCH /policies/:id`
    pub async fn update(&self, id: &PolicyId, form: &PolicyForm) -> Result<Policy, ClientError> {
        self.client.patch(&format!("policies/{id}"), form).await
    }

    /// `DELETE /policies/:id`
    pub async fn delete(&self, id: &PolicyId) -> Result<ApiAck, ClientError> {
        self.client.delete(&format!("policies/{id}")).await
    }

    /// `GET /policies/statistics`
    pub async fn statistics(&self) -> Result<PolicyStatistics, ClientError> {
        self.client.get("policies/statistics").await
    }
}
