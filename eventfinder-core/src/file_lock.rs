//! Cross-process locking and atomic replacement for the JSON data files.
//!
//! The CLI and the `eventfinder-notify` daemon both rewrite files in the data
//! directory, so an in-process mutex is not enough.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use crate::error::FinderResult;

/// Exclusive lock on `<file>.lock`, released when dropped.
pub(crate) struct FileLock {
    file: File,
}

impl FileLock {
    /// Block until no other process or handle holds the lock for `path`.
    pub(crate) fn acquire(path: &Path) -> FinderResult<Self> {
        let lock_path = lock_path(path);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        tracing::trace!(path = %lock_path.display(), "acquired file lock");

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".lock");
    path.with_file_name(name)
}

/// Replace `path` with `content` via a uniquely named temp file in the same
/// directory, so readers never see a partial write.
pub(crate) fn write_atomic(path: &Path, content: &str) -> FinderResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(content.as_bytes())?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_file_sits_next_to_data_file() {
        assert_eq!(
            lock_path(Path::new("/data/notifications.json")),
            Path::new("/data/notifications.json.lock")
        );
    }

    #[test]
    fn test_write_atomic_replaces_content_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        write_atomic(&path, "{\"a\":\"1\"}").unwrap();
        write_atomic(&path, "{}").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec!["store.json"]);
    }

    #[test]
    fn test_lock_is_exclusive_between_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let held = FileLock::acquire(&path).unwrap();
        let other = File::open(lock_path(&path)).unwrap();
        assert!(other.try_lock_exclusive().is_err());

        drop(held);
        assert!(other.try_lock_exclusive().is_ok());
    }
}
