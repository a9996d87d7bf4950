//! Local key/value storage
//!
//! A small string store standing in for browser local storage. It lives in
//! memory and, when opened on a path, mirrors every write to a JSON file so
//! the session survives between invocations of the command-line front end.

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use thiserror::Error;
use tracing::debug;

/// Key holding the bearer token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Key holding the signed-in user's role
pub const USER_ROLE_KEY: &str = "userRole";
/// Key holding the recently downloaded reports list
pub const RECENT_REPORTS_KEY: &str = "recentReports";

/// Errors raised by the storage file
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// String key/value store, optionally persisted to a JSON file
#[derive(Debug, Default)]
pub struct LocalStorage {
    entries: RwLock<BTreeMap<String, String>>,
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Creates an empty store that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a store backed by `path`, loading existing entries
    ///
    /// A missing file is treated as an empty store; it is created on the
    /// first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                let parsed: BTreeMap<String, Value> = serde_json::from_str(&raw)?;
                parsed
                    .into_iter()
                    .map(|(key, value)| match value {
                        Value::String(s) => (key, s),
                        other => (key, other.to_string()),
                    })
                    .collect()
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "Opened local storage");

        Ok(Self {
            entries: RwLock::new(entries),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.into());
        self.persist(&entries)
    }

    /// Removes a key; removing a missing key is not an error
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Removes several keys under one lock and persists once
    pub fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() != before {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Snapshot of all entries
    pub fn entries(&self) -> BTreeMap<String, String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}
