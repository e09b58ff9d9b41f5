//! Durable persistence for session state.
//!
//! The session persists a single JSON blob per well-known key and reads
//! it back at startup. Storage failures are never fatal: reads fail
//! open to an empty state and dropped writes are only logged.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Mutex;

/// Key under which the selection set is persisted.
pub const SELECTION_KEY: &str = "selectedProducts";

/// Key under which the conversation history is persisted.
pub const CONVERSATION_KEY: &str = "conversationHistory";

/// Error type for storage backends.
#[derive(Debug)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    /// Creates a new error with the given message.
    #[inline]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for StorageError {}

/// A key-value store holding one serialized blob per key.
///
/// Writes happen only from the one session's own mutations, so the
/// last writer wins and no concurrency control is needed.
pub trait Storage: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// An in-memory [`Storage`] backend.
///
/// The default backend when none is configured, and the one the tests
/// use to observe what the session persists.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::new("storage mutex poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::new("storage mutex poisoned"))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::default();
        assert!(storage.read(SELECTION_KEY).unwrap().is_none());

        storage.write(SELECTION_KEY, "[]").unwrap();
        assert_eq!(storage.read(SELECTION_KEY).unwrap().as_deref(), Some("[]"));

        storage.write(SELECTION_KEY, "[1]").unwrap();
        assert_eq!(storage.read(SELECTION_KEY).unwrap().as_deref(), Some("[1]"));
    }
}
