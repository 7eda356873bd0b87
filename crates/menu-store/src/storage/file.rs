//! File-backed blob store: one `<key>.json` file per key in a directory.
//!
//! Writes go to `<key>.json.tmp` first and are renamed into place, so a
//! crash mid-write leaves the previous snapshot intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::BlobStore;
use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Uses `dir` as the storage directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StoreError::storage(format!("cannot create data dir {}: {}", dir.display(), e))
        })?;
        debug!(dir = ?dir, "Opened file blob store");
        Ok(FileBlobStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::storage(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value)
            .map_err(|e| StoreError::storage(format!("cannot write {}: {}", tmp.display(), e)))?;

        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = ?tmp, error = %cleanup, "Failed to remove temporary file");
            }
            return Err(StoreError::storage(format!(
                "cannot replace {}: {}",
                path.display(),
                e
            )));
        }

        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::storage(format!(
                "cannot delete {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
