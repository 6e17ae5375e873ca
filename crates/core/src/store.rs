//! Key-value persistence for shop records.
//!
//! The shop keeps four records, each JSON-encoded under a fixed key and
//! overwritten wholesale on every change:
//!
//! | Key        | Value                          | Default  |
//! |------------|--------------------------------|----------|
//! | `fe_cart`  | `[{"id": 1, "qty": 2}, ...]`   | `[]`     |
//! | `fe_users` | `[{"username", "password"}]`   | `[]`     |
//! | `fe_user`  | `"display name"`               | absent   |
//! | `fe_dark`  | `true` / `false`               | `false`  |
//!
//! Reads never fail: a missing, unreadable or malformed record falls back
//! to its default and logs a warning.

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Record keys.
pub mod keys {
    /// Cart lines.
    pub const CART: &str = "fe_cart";

    /// Demo account list.
    pub const USERS: &str = "fe_users";

    /// Current session display name.
    pub const CURRENT_USER: &str = "fe_user";

    /// Dark-mode preference.
    pub const DARK: &str = "fe_dark";
}

/// Errors raised by a key-value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be read or written.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded.
    #[error("failed to encode record {key}: {source}")]
    Encode {
        /// Record key.
        key: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error,
    },

    /// The backend holds malformed data as a whole (not a single record).
    #[error("corrupt storage: {0}")]
    Corrupt(String),
}

/// A string key-value store in the style of a browser's persistent storage.
pub trait KeyValueStore {
    /// Read the raw value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the value for `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Delete `key` if present.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load a JSON record, falling back to `default` when it is absent or bad.
pub fn load_record<T, S>(store: &S, key: &str, default: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read record, using default");
            return default;
        }
    };

    match serde_json::from_str::<T>(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed record, using default");
            default
        }
    }
}

/// Encode and overwrite a JSON record.
///
/// # Errors
///
/// Returns `StoreError` if encoding or the backend write fails.
pub fn save_record<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, raw)
}

/// In-memory store.
///
/// Also used as a detachable snapshot: the storefront keeps one per browser
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build a store from existing entries.
    #[must_use]
    pub const fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Borrow the raw entries.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
