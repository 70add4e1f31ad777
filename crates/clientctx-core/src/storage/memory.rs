//! In-process key-value store.

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{KeyValueStore, StoreError};

/// Key-value store held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock();
        Ok(entries
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    fn put_if_absent(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<String, StoreError> {
        let mut entries = self.entries.lock();
        let stored = entries
            .entry((namespace.to_string(), key.to_string()))
            .or_insert_with(|| value.to_string());
        Ok(stored.clone())
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.lock();
        Ok(entries
            .remove(&(namespace.to_string(), key.to_string()))
            .is_some())
    }
}
