//! Portal configuration
//!
//! Read from `PORTAL_*` environment variables (after `.env` is loaded by the
//! binary), falling back to defaults for a local backend.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use infra_client::{ClientConfig, DEFAULT_BASE_URL};

/// Default location of the session file
pub const DEFAULT_STORAGE_FILE: &str = ".portal-session.json";

/// Portal configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortalConfig {
    /// Backend API root
    pub api_base_url: String,
    /// File holding the session and recent reports
    pub storage_file: PathBuf,
    /// Request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// How many downloaded reports to remember
    pub recent_reports_limit: usize,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            storage_file: PathBuf::from(DEFAULT_STORAGE_FILE),
            timeout_secs: None,
            log_level: "info".to_string(),
            recent_reports_limit: 5,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from `PORTAL_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_environment(Environment::with_prefix("PORTAL"))
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("api_base_url", defaults.api_base_url)?
            .set_default("storage_file", DEFAULT_STORAGE_FILE)?
            .set_default("log_level", defaults.log_level)?
            .set_default("recent_reports_limit", defaults.recent_reports_limit as u64)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Settings for the HTTP client
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_base_url);
        match self.timeout_secs {
            Some(secs) if secs > 0 => config.with_timeout(Duration::from_secs(secs)),
            _ => config,
        }
    }
}
