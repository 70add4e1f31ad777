//! Core collector abstractions.
//!
//! `DataCollector` is the contract every collector implements. `FileSystem`
//! lets host-backed platforms read system files from the real filesystem or
//! from an in-memory mock in tests.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use crate::collector::platform::Platform;

/// Raw collector output. `None` marks a value the platform could not provide.
pub type CollectedData = BTreeMap<String, Option<String>>;

/// Sanitized, merged context data. Never contains absent values.
pub type ContextData = BTreeMap<String, String>;

/// Produces one category of environment facts for a platform.
///
/// Implementations must not panic or fail for expected missing data: absent
/// values are reported as `None` entries and removed by the aggregator.
pub trait DataCollector: Send + Sync {
    /// Short collector name used in logs and timings.
    fn name(&self) -> &'static str;

    /// Collects this collector's facts from `platform`.
    fn collect(&self, platform: &dyn Platform) -> CollectedData;
}

/// Abstraction for filesystem reads.
///
/// This trait allows host platforms to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Inserts a present value into collector output.
pub(crate) fn put(data: &mut CollectedData, key: &str, value: impl Into<String>) {
    data.insert(key.to_string(), Some(value.into()));
}

/// Inserts a possibly absent value into collector output.
pub(crate) fn put_opt(data: &mut CollectedData, key: &str, value: Option<String>) {
    data.insert(key.to_string(), value);
}
