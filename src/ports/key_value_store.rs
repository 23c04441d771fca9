//! Key-Value Store Port - Interface for the persistence layer.
//!
//! All application state lives in an opaque string-keyed store holding JSON
//! strings. The engine never talks to a concrete storage API; browser
//! storage, a file, or a plain hash map all satisfy this port.
//!
//! Writes are whole-value replacements with no version check: two callers
//! doing concurrent fetch-modify-write resolve as last-write-wins.

use async_trait::async_trait;

/// Errors that can occur during store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Store read failed for key '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("Store write failed for key '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    #[error("Store backend unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn read_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::ReadFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn write_failed(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::WriteFailed {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Port for the string-keyed persistence backing all session state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Returns every key starting with `prefix`, in unspecified order.
    ///
    /// Supports the linear session scan used by email lookup.
    async fn keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}
