//! Portal Backend Client
//!
//! This crate talks to the portal's REST backend (`/api/v1`). It owns the
//! session (bearer token and role kept in local storage), the shared request
//! pipeline, and one thin wrapper per resource.
//!
//! # Architecture
//!
//! ```text
//!   ClaimsApi  UsersApi  PoliciesApi  ReportsApi  VapiApi   Dashboard
//!        \         \          |           /          /          /
//!         `---------`-------- ApiClient --`----------`----------`
//!                                |
//!                  Session ── LocalStorage (authToken, userRole)
//!                  Navigator (sent to /login on 401)
//! ```
//!
//! `ClaimsApi` and `UsersApi` also implement the domain ports
//! (`ClaimsPort`, `UsersPort`) so the form layer can run against either the
//! backend or an in-memory fake.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_client::{ApiClient, ClaimsApi, ClientConfig, LoggingNavigator, Session};
//!
//! let session = Session::in_memory();
//! let client = ApiClient::new(ClientConfig::default(), session, Arc::new(LoggingNavigator))?;
//! let claims = ClaimsApi::new(client).list(&Default::default()).await?;
//! ```

pub mod config;
pub mod error;
pub mod storage;
pub mod session;
pub mod client;
pub mod claims;
pub mod users;
pub mod policies;
pub mod reports;
pub mod vapi;
pub mod dashboard;

pub use claims::ClaimsApi;
pub use client::{ApiAck, ApiClient, ApiEnvelope, Blob};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use dashboard::{Dashboard, DashboardSummary};
pub use error::ClientError;
pub use policies::PoliciesApi;
pub use reports::{RecentReport, RecentReports, ReportKind, ReportQuery, ReportsApi};
pub use session::{LoggingNavigator, Navigator, Session, LOGIN_ROUTE};
pub use storage::{LocalStorage, StorageError};
pub use users::UsersApi;
pub use vapi::{ApiCallRequest, DbOperationRequest, FunctionCallRequest, VapiApi};
