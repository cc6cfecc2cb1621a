//! Key-value persistence backends for the session and app stores.
//!
//! SYSTEM CONTEXT
//! ==============
//! Stores never touch `localStorage` directly. They receive a
//! `StorageBackend` at construction, which keeps the reducers testable and
//! lets SSR run with a backend that simply has nothing saved.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Raw string storage keyed by name.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the backend refuses the write.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Reads nothing and drops writes outside the browser.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl StorageBackend for BrowserStorage {
    fn read(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        #[cfg(feature = "hydrate")]
        {
            let storage = local_storage().ok_or(StoreError::Unavailable)?;
            storage.set_item(key, value).map_err(|_| StoreError::Unavailable)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Ok(())
        }
    }

    fn remove(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }
}

/// In-process storage, used where no browser is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `key` with a raw value.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
        self
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Unavailable)?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Load a JSON value stored under `key`.
///
/// A missing entry is `Ok(None)`. An entry that no longer parses is removed
/// so the next boot starts clean.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` when the stored JSON does not match `T`.
pub fn load_json<T: DeserializeOwned>(backend: &impl StorageBackend, key: &str) -> Result<Option<T>, StoreError> {
    let Some(raw) = backend.read(key) else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            log::warn!("discarding unreadable `{key}`: {e}");
            backend.remove(key);
            Err(StoreError::Corrupt { key: key.to_owned() })
        }
    }
}

/// Save `value` as JSON under `key`.
///
/// # Errors
///
/// Returns an error if serialization fails or the backend rejects the write.
pub fn save_json<T: Serialize>(backend: &impl StorageBackend, key: &str, value: &T) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StoreError::Serialize { key: key.to_owned(), message: e.to_string() })?;
    backend.write(key, &raw)
}
