//! Voice assistant bridge endpoints
//!
//! The voice assistant calls back into the portal through three generic
//! endpoints. Payloads are opaque JSON; the portal only adds the caller's
//! role so the backend can scope what the assistant may read or change.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use core_kernel::Role;

use crate::client::ApiClient;
use crate::error::ClientError;

/// Body of `POST /vapi/execute-function`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCallRequest {
    pub function_name: String,
    pub parameters: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

/// Body of `POST /vapi/db-operation`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DbOperationRequest {
    /// `find`, `findOne`, `count`, `update` and so on
    pub operation: String,
    pub collection: String,
    pub query: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

/// Body of `POST /vapi/api-call`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCallRequest {
    pub method: String,
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_role: Option<Role>,
}

/// Client for `/vapi`
#[derive(Debug, Clone)]
pub struct VapiApi {
    client: ApiClient,
}

impl VapiApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn role(&self) -> Option<Role> {
        self.client.session().role()
    }

    #[instrument(skip(self, parameters))]
    pub async fn execute_function(
        &self,
        function_name: &str,
        parameters: Value,
    ) -> Result<Value, ClientError> {
        let body = FunctionCallRequest {
            function_name: function_name.to_string(),
            parameters,
            user_role: self.role(),
        };
        debug!(role = ?body.user_role, "Executing assistant function");
        self.client.post("vapi/execute-function", &body).await
    }

    #[instrument(skip(self, query, data))]
    pub async fn db_operation(
        &self,
        operation: &str,
        collection: &str,
        query: Value,
        data: Option<Value>,
    ) -> Result<Value, ClientError> {
        let body = DbOperationRequest {
            operation: operation.to_string(),
            collection: collection.to_string(),
            query,
            data,
            user_role: self.role(),
        };
        self.client.post("vapi/db-operation", &body).await
    }

    #[instrument(skip(self, data))]
    pub async fn api_call(
        &self,
        method: &str,
        endpoint: &str,
        data: Option<Value>,
    ) -> Result<Value, ClientError> {
        let body = ApiCallRequest {
            method: method.to_ascii_uppercase(),
            endpoint: endpoint.to_string(),
            data,
            user_role: self.role(),
        };
        self.client.post("vapi/api-call", &body).await
    }
}
