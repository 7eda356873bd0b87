//! # menu-store: Menu Store for Menu Builder
//!
//! Owns the live menu and keeps it mirrored to storage.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          menu-store                                     │
//! │                                                                         │
//! │  ┌──────────────┐   commands    ┌────────────────────────────────────┐ │
//! │  │EditorSession │ ────────────► │            MenuStore               │ │
//! │  │ Idle/Editing │               │  tables + draft + IdGenerator      │ │
//! │  └──────────────┘               └──────────────┬─────────────────────┘ │
//! │                                                │ save / load / erase    │
//! │                                 ┌──────────────▼─────────────────────┐ │
//! │  ┌──────────────┐   builds      │        MenuStorage<B>              │ │
//! │  │ StoreConfig  │ ────────────► │  FileBlobStore | MemoryBlobStore   │ │
//! │  │ (menu.toml)  │               └────────────────────────────────────┘ │
//! │  └──────────────┘                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use menu_store::{MenuStore, StoreConfig};
//!
//! let mut store = MenuStore::open(&StoreConfig::in_memory()).unwrap();
//! store.add_category("Drinks").unwrap();
//! assert_eq!(store.stats().categories, 1);
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod storage;
pub mod store;

pub use config::{PersistPolicy, StorageBackend, StoreConfig};
pub use editor::{EditMode, EditorSession};
pub use error::{StoreError, StoreResult};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, MenuStorage};
pub use store::MenuStore;
