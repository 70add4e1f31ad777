//! Directory-backed key-value store.
//!
//! Layout: `<root>/<namespace>/<key>`, one file per entry holding the raw
//! value. New entries are written to a `.tmp` file and hard-linked into
//! place; the link fails when the entry already exists, so concurrent
//! writers (threads or processes) agree on the first value.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;

use super::{KeyValueStore, StoreError};

/// Attempts before giving up on an entry that keeps disappearing.
const MAX_PUT_ATTEMPTS: usize = 3;

/// Key-value store persisted under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, namespace: &str, key: &str) -> Result<PathBuf, StoreError> {
        validate_name(namespace)?;
        validate_name(key)?;
        Ok(self.root.join(namespace).join(key))
    }
}

/// Rejects names that would escape the store directory or clash with temp files.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn read_entry(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn write_tmp(dir: &Path, key: &str, value: &str) -> io::Result<PathBuf> {
    let tmp_path = dir.join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));
    let mut file = File::create(&tmp_path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()?;
    Ok(tmp_path)
}

impl KeyValueStore for FileStore {
    fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(namespace, key)?;
        read_entry(&path)
    }

    fn put_if_absent(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<String, StoreError> {
        let path = self.entry_path(namespace, key)?;
        let dir = self.root.join(namespace);

        for _ in 0..MAX_PUT_ATTEMPTS {
            if let Some(existing) = read_entry(&path)? {
                return Ok(existing);
            }

            fs::create_dir_all(&dir)?;
            let tmp_path = write_tmp(&dir, key, value)?;
            let linked = fs::hard_link(&tmp_path, &path);
            if let Err(e) = fs::remove_file(&tmp_path) {
                warn!("failed to remove {}: {}", tmp_path.display(), e);
            }

            match linked {
                Ok(()) => return Ok(value.to_string()),
                // Lost the race: the other writer's value is authoritative.
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    if let Some(existing) = read_entry(&path)? {
                        return Ok(existing);
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StoreError::Contended {
            namespace: namespace.to_string(),
            key: key.to_string(),
        })
    }

    fn remove(&self, namespace: &str, key: &str) -> Result<bool, StoreError> {
        let path = self.entry_path(namespace, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
