//! Mock Backend
//!
//! Serves canned responses on a random local port so the real HTTP client
//! can be exercised end to end. Routes are matched on method and path
//! (relative to `/api/v1`); every request is recorded for later assertions.
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await;
//! backend.on("GET", "/claims/c1", MockResponse::data(json!({ ... })));
//! let client = backend.client(Session::in_memory(), Arc::new(RecordingNavigator::new()));
//! ```

use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use infra_client::{ApiClient, ClientConfig, Navigator, Session};

/// Path prefix of the portal API
pub const API_PREFIX: &str = "/api/v1";

/// A canned response
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: Vec<(String, String)>,
}

impl MockResponse {
    /// Arbitrary JSON body
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string().into_bytes(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    /// `200 {success: true, data}`
    pub fn data(data: Value) -> Self {
        Self::json(200, json!({ "success": true, "data": data }))
    }

    /// `200 {success: true, message}`
    pub fn ack(message: &str) -> Self {
        Self::json(200, json!({ "success": true, "message": message }))
    }

    /// Error status with the backend's `{success: false, message}` body
    pub fn error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "success": false, "message": message }))
    }

    /// Error status with a body the client cannot read
    pub fn bare_status(status: u16) -> Self {
        Self {
            status,
            body: b"<html>gateway error</html>".to_vec(),
            headers: vec![("content-type".to_string(), "text/html".to_string())],
        }
    }

    /// Binary download
    pub fn file(content_type: &str, bytes: &[u8], filename: Option<&str>) -> Self {
        let mut headers = vec![("content-type".to_string(), content_type.to_string())];
        if let Some(name) = filename {
            headers.push((
                "content-disposition".to_string(),
                format!("attachment; filename=\"{name}\""),
            ));
        }
        Self {
            status: 200,
            body: bytes.to_vec(),
            headers,
        }
    }
}

/// A request seen by the mock backend
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to `/api/v1`
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Value of a query string parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(String, String), MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running mock backend; stops when dropped
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Binds to a free local port and starts serving
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let state = Arc::new(MockState::default());

        let app = Router::new().fallback(respond).with_state(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state, server }
    }

    /// Base URL to hand to `ClientConfig`
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Client pointed at this backend
    pub fn client(&self, session: Session, navigator: Arc<dyn Navigator>) -> ApiClient {
        ApiClient::new(ClientConfig::new(self.base_url()), session, navigator)
            .expect("build client")
    }

    /// Registers the response for `method path`; later registrations win
    pub fn on(&self, method: &str, path: &str, response: MockResponse) {
        self.state
            .routes
            .lock()
            .expect("routes")
            .insert((method.to_ascii_uppercase(), path.to_string()), response);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("requests").clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().expect("requests").last().cloned()
    }

    /// Requests made to one path
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn respond(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();

    let recorded = RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state.requests.lock().expect("requests").push(recorded);

    let canned = state
        .routes
        .lock()
        .expect("routes")
        .get(&(method.to_string(), path))
        .cloned()
        .unwrap_or_else(|| MockResponse::error(404, "Route not found"));

    let mut builder = Response::builder()
        .status(StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));
    for (name, value) in &canned.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(Body::from(canned.body))
        .expect("mock response")
}
