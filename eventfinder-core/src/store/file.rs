//! JSON-file backed store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{FinderError, FinderResult};
use crate::file_lock::{FileLock, write_atomic};

type Entries = BTreeMap<String, String>;

/// A store persisted as a single JSON object on disk.
///
/// Every read goes back to the file so that changes made by another
/// `eventfinder` process are picked up. Writes hold a lock file for the
/// whole read-modify-write and replace the file atomically.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn open(path: impl Into<PathBuf>) -> FinderResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(FileStore { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> FinderResult<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            FinderError::Store(format!("Corrupt store file {}: {e}", self.path.display()))
        })
    }

    fn update(&self, f: impl FnOnce(&mut Entries)) -> FinderResult<()> {
        let _lock = FileLock::acquire(&self.path)?;

        let mut entries = self.read()?;
        f(&mut entries);
        write_atomic(&self.path, &serde_json::to_string_pretty(&entries)?)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> FinderResult<Option<String>> {
        Ok(self.read()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> FinderResult<()> {
        tracing::trace!(key, "store set");
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> FinderResult<()> {
        tracing::trace!(key, "store remove");
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn all_keys(&self) -> FinderResult<Vec<String>> {
        Ok(self.read()?.into_keys().collect())
    }

    fn multi_get(&self, keys: &[String]) -> FinderResult<Vec<(String, String)>> {
        let mut entries = self.read()?;
        Ok(keys
            .iter()
            .filter_map(|k| entries.remove(k).map(|v| (k.clone(), v)))
            .collect())
    }
}
