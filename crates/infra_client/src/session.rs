//! Session state and navigation
//!
//! The session is the bearer token and role kept in local storage. Every
//! client shares one `Session`; when the backend rejects the token the client
//! clears it and sends the injected `Navigator` to the login route.

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::Role;

use crate::storage::{LocalStorage, StorageError, AUTH_TOKEN_KEY, USER_ROLE_KEY};

/// Route shown when the session is missing or expired
pub const LOGIN_ROUTE: &str = "/login";

/// Moves the user interface to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Navigator for headless front ends: logs the redirect
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "Navigation requested");
    }
}

/// Token and role of the signed-in user
#[derive(Debug, Clone)]
pub struct Session {
    storage: Arc<LocalStorage>,
}

impl Session {
    pub fn new(storage: Arc<LocalStorage>) -> Self {
        Self { storage }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(LocalStorage::in_memory()))
    }

    pub fn storage(&self) -> &Arc<LocalStorage> {
        &self.storage
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get(AUTH_TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Role of the signed-in user; an unreadable stored role counts as none
    pub fn role(&self) -> Option<Role> {
        let raw = self.storage.get(USER_ROLE_KEY)?;
        match raw.parse() {
            Ok(role) => Some(role),
            Err(_) => {
                warn!(role = %raw, "Ignoring unknown stored role");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Stores the token and role returned by the login endpoint
    pub fn sign_in(&self, token: impl Into<String>, role: Role) -> Result<(), StorageError> {
        self.storage.set(AUTH_TOKEN_KEY, token)?;
        self.storage.set(USER_ROLE_KEY, role.as_str())
    }

    /// Forgets the token and role
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_all(&[AUTH_TOKEN_KEY, USER_ROLE_KEY])
    }
}
