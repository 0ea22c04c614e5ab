//! Session Storage
//!
//! Thin seam over the browser's session-scoped storage. Values are stored as
//! raw strings so tokens stay readable by anything else on the page.

use std::collections::HashMap;
use std::sync::Mutex;

use gloo_storage::{SessionStorage, Storage};
use thiserror::Error;

use crate::models::FormData;

pub const ACCESS_TOKEN_KEY: &str = "AccessToken";
pub const TOKEN_EXPIRATION_KEY: &str = "TokenExpiration";
pub const FORM_DATA_KEY: &str = "form_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Key/value store with session lifetime
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str);
}

/// `window.sessionStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn get(&self, key: &str) -> Option<String> {
        SessionStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        SessionStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) {
        let _ = SessionStorage::raw().remove_item(key);
    }
}

/// In-process store, used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemorySession {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemorySession {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

pub fn access_token(store: &impl SessionStore) -> Option<String> {
    store.get(ACCESS_TOKEN_KEY).filter(|token| !token.is_empty())
}

/// Read the wizard form data; a malformed record is treated as absent
pub fn load_form_data(store: &impl SessionStore) -> Option<FormData> {
    let raw = store.get(FORM_DATA_KEY)?;
    match serde_json::from_str(&raw) {
        Ok(form) => Some(form),
        Err(e) => {
            tracing::warn!(error = %e, "discarding malformed form_data");
            None
        }
    }
}

/// Overwrite the stored form data wholesale
pub fn save_form_data(store: &impl SessionStore, form: &FormData) -> Result<(), StorageError> {
    let raw = serde_json::to_string(form)?;
    store.set(FORM_DATA_KEY, &raw)
}

pub fn clear_form_data(store: &impl SessionStore) {
    store.remove(FORM_DATA_KEY);
}
