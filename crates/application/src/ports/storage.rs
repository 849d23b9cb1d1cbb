//! Durable key-value storage port
//!
//! The client keeps its session in a small string key-value store that
//! survives restarts, the way a browser keeps it in local storage.

use async_trait::async_trait;

/// Errors raised by storage adapters.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No storage location is available on this system.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// String key-value storage that survives process restarts.
///
/// Removal of a missing key is not an error.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
