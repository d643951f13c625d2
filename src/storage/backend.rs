//! Storage backend abstraction.
//!
//! The [`Storage`] trait is a minimal string key-value store. History and the
//! theme preference each own one key and serialize their own values, so backends
//! never need to know about the records they hold.

use crate::domain::error::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Abstraction over durable key-value storage.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): single JSON file with atomic writes
/// - [`MemoryStorage`]: process-local map, used as a fallback and in tests
///
/// # Examples
///
/// ```
/// use cinesearch::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::default();
/// storage.write("movie-app-theme", "dark")?;
/// assert_eq!(storage.read("movie-app-theme")?.as_deref(), Some("dark"));
/// # Ok::<(), cinesearch::CinesearchError>(())
/// ```
pub trait Storage: Send {
    /// Returns the value stored under `key`, or `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be persisted. Callers that must not
    /// fail (history, preferences) log and continue.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Storage handle shared by every component that persists state.
pub type SharedStorage = Arc<Mutex<dyn Storage>>;

/// Wraps a backend into a [`SharedStorage`] handle.
pub fn shared<S: Storage + 'static>(storage: S) -> SharedStorage {
    Arc::new(Mutex::new(storage))
}

/// In-memory storage backend.
///
/// Holds values for the lifetime of the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        tracing::trace!(key = %key, bytes = value.len(), "memory storage write");
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
