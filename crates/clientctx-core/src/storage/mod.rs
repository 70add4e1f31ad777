//! Persisted key-value storage.
//!
//! The device-agent identifier is the only state this crate persists. Stores
//! expose an atomic set-if-absent so concurrent first writers agree on one
//! value.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Error type for storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error reading or writing an entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Namespace or key cannot be used as a storage name.
    #[error("invalid storage name: {0:?}")]
    InvalidName(String),
    /// Entry kept changing under a set-if-absent.
    #[error("entry {namespace}/{key} changed concurrently")]
    Contended { namespace: String, key: String },
}

/// Namespaced string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `namespace`/`key`, if any.
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` unless an entry already exists.
    ///
    /// Returns the value held after the call: the existing one if present,
    /// otherwise `value`. The first writer wins.
    fn put_if_absent(&self, namespace: &str, key: &str, value: &str)
    -> Result<String, StoreError>;

    /// Removes an entry. Returns `true` if it existed.
    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError>;
}
