//! # Persistence Adapter
//!
//! Mirrors the menu tables into a key-value blob store.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Persistence Layers                                 │
//! │                                                                         │
//! │  MenuStore ──► MenuStorage<B> ──► B: BlobStore                         │
//! │                 │                   ├── MemoryBlobStore (tests, demo)  │
//! │                 │                   └── FileBlobStore  (<dir>/<key>.json)
//! │                 │                                                       │
//! │                 └── one JSON snapshot under one key:                   │
//! │                     { categories, products, modifiers, lastUpdated }   │
//! │                                                                         │
//! │  Absent key  = empty menu                                              │
//! │  erase()     = delete the key                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use chrono::{DateTime, Utc};
use menu_core::document::{MenuSnapshot, MenuSnapshotRef};
use menu_core::MenuTables;
use tracing::debug;

use crate::error::StoreResult;

/// Key the snapshot is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "menu_builder_data";

// =============================================================================
// Blob Store Trait
// =============================================================================

/// Byte-oriented key-value storage.
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete a key. Deleting an absent key succeeds.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

// =============================================================================
// Menu Storage
// =============================================================================

/// Reads and writes the menu snapshot under a fixed key.
#[derive(Debug)]
pub struct MenuStorage<B> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> MenuStorage<B> {
    /// Uses [`DEFAULT_STORAGE_KEY`].
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        MenuStorage {
            blobs,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the underlying blob store.
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Loads the stored snapshot. `Ok(None)` when nothing has been saved.
    ///
    /// A blob that is not a valid snapshot is a `Serialization` error; the
    /// caller decides whether that is fatal.
    pub fn load(&self) -> StoreResult<Option<MenuSnapshot>> {
        let Some(bytes) = self.blobs.get(&self.key)? else {
            debug!(key = %self.key, "No stored menu");
            return Ok(None);
        };

        let snapshot: MenuSnapshot = serde_json::from_slice(&bytes)?;
        debug!(key = %self.key, bytes = bytes.len(), "Loaded stored menu");
        Ok(Some(snapshot))
    }

    /// Writes the tables with `last_updated` as the snapshot timestamp.
    pub fn save(&self, tables: &MenuTables, last_updated: DateTime<Utc>) -> StoreResult<()> {
        let bytes = serde_json::to_vec(&MenuSnapshotRef::new(tables, last_updated))?;
        self.blobs.set(&self.key, &bytes)?;
        debug!(key = %self.key, bytes = bytes.len(), "Saved menu");
        Ok(())
    }

    /// Removes the stored snapshot.
    pub fn erase(&self) -> StoreResult<()> {
        self.blobs.delete(&self.key)?;
        debug!(key = %self.key, "Erased stored menu");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use menu_core::{Category, CategoryId};

    fn tables() -> MenuTables {
        MenuTables {
            categories: vec![Category {
                id: CategoryId::new(1),
                name: "Drinks".to_string(),
            }],
            ..MenuTables::default()
        }
    }

    #[test]
    fn test_load_absent_key_is_none() {
        let storage = MenuStorage::new(MemoryBlobStore::new());
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_erase() {
        let storage = MenuStorage::new(MemoryBlobStore::new());
        let now = Utc::now();

        storage.save(&tables(), now).unwrap();
        let snapshot = storage.load().unwrap().unwrap();
        assert_eq!(snapshot.last_updated, Some(now));
        assert_eq!(snapshot.into_tables(), tables());

        storage.erase().unwrap();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_custom_key() {
        let blobs = MemoryBlobStore::new();
        let storage = MenuStorage::with_key(blobs.clone(), "other_menu");
        storage.save(&tables(), Utc::now()).unwrap();

        assert!(blobs.get("other_menu").unwrap().is_some());
        assert!(blobs.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_blob_is_serialization_error() {
        let blobs = MemoryBlobStore::new();
        blobs.set(DEFAULT_STORAGE_KEY, b"{ not json").unwrap();

        let storage = MenuStorage::new(blobs);
        assert!(matches!(storage.load(), Err(StoreError::Serialization(_))));
    }
}
