//! Shared request pipeline
//!
//! Every wrapper goes through `ApiClient`, which
//! - attaches `Authorization: Bearer <token>` when the session has one
//! - clears the session and navigates to `/login` on 401
//! - turns other non-2xx answers into `ClientError::Api` with the backend's
//!   `message` when it sent one
//! - unwraps the `{success, message, data}` envelope into the caller's type
//!
//! Blob endpoints (report PDFs, claim documents) skip the envelope and hand
//! back raw bytes.

use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{Navigator, Session, LOGIN_ROUTE};

/// Success envelope used by every JSON endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Body of endpoints that only acknowledge an action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Raw file returned by a download endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Name suggested by `Content-Disposition`
    pub filename: Option<String>,
}

impl Blob {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client bound to one backend and one session
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    /// Creates a client
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL and optional timeout
    /// * `session` - Shared token/role store
    /// * `navigator` - Receives the login route when the session expires
    pub fn new(
        config: ClientConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
            session,
            navigator,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.config.endpoint(path));
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends a request and applies the status policy
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "Backend responded");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(ClientError::Unauthorized);
        }

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    fn expire_session(&self) {
        warn!("Session rejected by backend, signing out");
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear stored session");
        }
        self.navigator.navigate(LOGIN_ROUTE);
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(method, path, request).await?;
        let status = response.status();
        let body = response.bytes().await?;
        let envelope: ApiEnvelope<T> =
            serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        match envelope {
            ApiEnvelope { data: Some(data), .. } => Ok(data),
            ApiEnvelope {
                success: false,
                message: Some(message),
                ..
            } => Err(ClientError::Api {
                status: status.as_u16(),
                message,
            }),
            _ => Err(ClientError::Decode(format!(
                "response from {path} has no data"
            ))),
        }
    }

    async fn send_ack(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ApiAck, ClientError> {
        let response = self.dispatch(method, path, request).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(ApiAck {
                success: true,
                message: None,
            });
        }
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// `GET path`, unwrapping `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(Method::GET, path);
        self.send_json(Method::GET, path, request).await
    }

    /// `GET path?query`, unwrapping `data`
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        self.send_json(Method::GET, path, request).await
    }

    /// `POST path` with a JSON body, unwrapping `data`
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path).json(body);
        self.send_json(Method::POST, path, request).await
    }

    /// `PATCH path` with a JSON body, unwrapping `data`
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, path).json(body);
        self.send_json(Method::PATCH, path, request).await
    }

    /// `DELETE path`
    pub async fn delete(&self, path: &str) -> Result<ApiAck, ClientError> {
        let request = self.request(Method::DELETE, path);
        self.send_ack(Method::DELETE, path, request).await
    }

    /// `GET path` returning the raw body
    pub async fn get_blob(&self, path: &str) -> Result<Blob, ClientError> {
        let request = self.request(Method::GET, path);
        self.fetch_blob(path, request).await
    }

    /// `GET path?query` returning the raw body
    pub async fn get_blob_with_query<Q>(&self, path: &str, query: &Q) -> Result<Blob, ClientError>
    where
        Q: Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path).query(query);
        self.fetch_blob(path, request).await
    }

    async fn fetch_blob(&self, path: &str, request: RequestBuilder) -> Result<Blob, ClientError> {
        let response = self.dispatch(Method::GET, path, request).await?;

        let content_type = header_value(&response, CONTENT_TYPE.as_str());
        let filename = header_value(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(disposition_filename);
        let bytes = response.bytes().await?.to_vec();

        debug!(path, len = bytes.len(), "Downloaded blob");

        Ok(Blob {
            bytes,
            content_type,
            filename,
        })
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}

fn header_value(response: &Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn error_message(response: Response) -> String {
    let status = response.status().as_u16();
    let fallback = format!("Request failed with status {status}");

    match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

/// Extracts the file name from a `Content-Disposition` header value
pub(crate) fn disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            disposition_filename(r#"attachment; filename="claims-report.pdf""#).as_deref(),
            Some("claims-report.pdf")
        );
        assert_eq!(
            disposition_filename("attachment; filename=users.pdf").as_deref(),
            Some("users.pdf")
        );
        assert!(disposition_filename("inline").is_none());
        assert!(disposition_filename(r#"attachment; filename="""#).is_none());
    }

    #[test]
    fn test_envelope_without_data() {
        let envelope: ApiEnvelope<Vec<String>> =
            serde_json::from_str(r#"{ "success": false, "message": "nothing" }"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("nothing"));
    }

    #[test]
    fn test_blob_debug_hides_bytes() {
        let blob = Blob {
            bytes: vec![1, 2, 3],
            content_type: Some("application/pdf".to_string()),
            filename: None,
        };
        let rendered = format!("{blob:?}");
        assert!(rendered.contains("len: 3"));
        assert_eq!(blob.len(), 3);
    }
}
