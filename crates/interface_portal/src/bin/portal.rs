//! Employee Insurance Portal - command-line client
//!
//! # Usage
//!
//! ```bash
//! portal session set --token "$TOKEN" --role hr_officer
//! portal claims list --status hr
//! portal claims forward 65a1f0c2e4b0a1b2c3d4e5f6 \
//!     --item "Medical Expenses=600" --item "Hospitalization=400"
//! portal reports download claims --start-date 2024-01-01
//! ```
//!
//! # Environment Variables
//!
//! * `PORTAL_API_BASE_URL` - Backend API root (default: http://localhost:5000/api/v1)
//! * `PORTAL_STORAGE_FILE` - Session file (default: .portal-session.json)
//! * `PORTAL_TIMEOUT_SECS` - Request timeout in seconds (default: none)
//! * `PORTAL_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `PORTAL_RECENT_REPORTS_LIMIT` - Recent reports to remember (default: 5)

use anyhow::Context;
use clap::Parser;
use serde_json::json;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use interface_portal::cli::{self, Cli};
use interface_portal::{PortalConfig, PortalError};

/// Exit code for input rejected by validation
const EXIT_INVALID: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = PortalConfig::from_env().context("failed to load PORTAL_* configuration")?;

    init_tracing(&config.log_level);
    tracing::debug!(api = %config.api_base_url, "Portal client starting");

    match cli::run(cli, config).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(PortalError::Validation(errors)) => {
            let report = json!({
                "message": "Please correct the highlighted fields",
                "errors": errors.errors,
            });
            eprintln!("{}", serde_json::to_string_pretty(&report)?);
            Ok(ExitCode::from(EXIT_INVALID))
        }
        Err(e) => Err(e.into()),
    }
}

/// Initializes the tracing subscriber on stderr, keeping stdout for JSON output.
///
/// # Arguments
///
/// * `log_level` - Filter used when `RUST_LOG` is not set
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
