//! Storage backend trait.
//!
//! Decouples the snippet store, preferences and autosave from where the
//! strings actually live.

/// Error types for storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Storage cannot be read or written (permissions, missing directory, disk full)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    /// The backing data exists but cannot be parsed
    #[error("Storage data is corrupt: {0}")]
    Corrupt(String),
}

/// Backend trait for flat string key-value storage.
///
/// Implementations must be shareable with the autosave worker thread.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
