//! Client configuration

use std::time::Duration;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";

/// Connection settings for the backend
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_client::ClientConfig;
///
/// let config = ClientConfig::new("https://portal.example.lk/api/v1/")
///     .with_timeout(Duration::from_secs(15));
/// assert_eq!(config.endpoint("/claims"), "https://portal.example.lk/api/v1/claims");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash
    pub base_url: String,
    /// Per-request timeout; requests wait indefinitely when unset
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Joins an endpoint path onto the base URL
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
