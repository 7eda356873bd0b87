use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::BlobStore;
use crate::error::{StoreError, StoreResult};

/// In-process blob store. Clones share the same map, so a test can keep a
/// handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.blobs.read().map(|blobs| blobs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let blobs = self
            .blobs
            .read()
            .map_err(|_| StoreError::storage("memory store lock poisoned (read)"))?;
        Ok(blobs.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StoreError::storage("memory store lock poisoned (write)"))?;
        blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|_| StoreError::storage("memory store lock poisoned (write)"))?;
        blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_delete() {
        let store = MemoryBlobStore::new();
        assert!(store.get("a").unwrap().is_none());

        store.set("a", b"one").unwrap();
        store.set("a", b"two").unwrap();
        assert_eq!(store.get("a").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);

        store.delete("a").unwrap();
        store.delete("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryBlobStore::new();
        let handle = store.clone();
        store.set("k", b"v").unwrap();
        assert_eq!(handle.get("k").unwrap(), Some(b"v".to_vec()));
    }
}
