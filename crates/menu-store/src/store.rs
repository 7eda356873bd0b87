//! # Menu Store
//!
//! The single owner of the live menu: three linked tables, the draft option
//! buffer, the id generator and the storage they are mirrored to.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mutating Command                                  │
//! │                                                                         │
//! │  1. Validate input against the current tables ──► Err: nothing changes │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. Build the next tables on a copy                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  3. Save the copy ──► failed + Strict: Err, nothing changes            │
//! │           │          failed + Log:    error! and continue              │
//! │           ▼                                                             │
//! │  4. Swap the copy in                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The presentation layer re-renders from the query methods after every
//! command; it never keeps its own copy of the tables.

use chrono::Utc;
use menu_core::document::import_tables;
use menu_core::validation::{option_value, validate_name};
use menu_core::{
    CascadeReport, Category, CategoryId, CoreError, IdGenerator, MenuExport, MenuStats,
    MenuTables, Modifier, ModifierId, ModifierInput, ModifierOption, OptionId, Product,
    ProductId, ProductInput, ValidationError,
};
use tracing::{debug, error, info, warn};

use crate::config::{PersistPolicy, StorageBackend, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::storage::{BlobStore, FileBlobStore, MemoryBlobStore, MenuStorage, DEFAULT_STORAGE_KEY};

/// The menu store.
///
/// ## Example
/// ```rust
/// use menu_core::ProductInput;
/// use menu_store::MenuStore;
///
/// let mut store = MenuStore::in_memory();
/// let drinks = store.add_category("Drinks").unwrap();
/// store
///     .add_product(&ProductInput {
///         category_id: drinks.id,
///         name: "Cola".to_string(),
///         description: "Cold soda".to_string(),
///         price: 2.5,
///         image: None,
///     })
///     .unwrap();
///
/// let export = store.generate_export();
/// assert_eq!(export.menu[0].products[0].name, "Cola");
/// ```
#[derive(Debug)]
pub struct MenuStore {
    tables: MenuTables,
    draft: Vec<ModifierOption>,
    ids: IdGenerator,
    storage: MenuStorage<Box<dyn BlobStore>>,
    policy: PersistPolicy,
}

impl MenuStore {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Opens the store described by `config` and loads any saved menu.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        config.validate()?;

        let blobs: Box<dyn BlobStore> = match config.backend() {
            StorageBackend::File => Box::new(FileBlobStore::open(config.resolved_data_dir()?)?),
            StorageBackend::Memory => Box::new(MemoryBlobStore::new()),
        };

        info!(
            backend = %config.backend(),
            key = %config.key(),
            policy = %config.policy(),
            "Opening menu store"
        );

        Self::load(blobs, config.key(), config.policy())
    }

    /// Builds a store over `blobs` and loads the snapshot stored at `key`.
    ///
    /// A stored blob that cannot be decoded is logged and ignored: the store
    /// starts empty and the next save overwrites it. Failing to read the
    /// blob at all is an error.
    pub fn load<B: BlobStore + 'static>(
        blobs: B,
        key: impl Into<String>,
        policy: PersistPolicy,
    ) -> StoreResult<Self> {
        let storage = MenuStorage::with_key(Box::new(blobs) as Box<dyn BlobStore>, key);

        let tables = match storage.load() {
            Ok(Some(snapshot)) => snapshot.into_tables(),
            Ok(None) => MenuTables::new(),
            Err(StoreError::Serialization(reason)) => {
                warn!(key = %storage.key(), %reason, "Stored menu is corrupt, starting empty");
                MenuTables::new()
            }
            Err(e) => return Err(e),
        };

        let mut ids = IdGenerator::new();
        if let Some(max) = tables.max_id() {
            ids.observe(max);
        }

        let stats = tables.stats();
        info!(
            categories = stats.categories,
            products = stats.products,
            modifiers = stats.modifiers,
            "Menu loaded"
        );

        Ok(MenuStore {
            tables,
            draft: Vec::new(),
            ids,
            storage,
            policy,
        })
    }

    /// An empty store backed by process memory.
    pub fn in_memory() -> Self {
        MenuStore {
            tables: MenuTables::new(),
            draft: Vec::new(),
            ids: IdGenerator::new(),
            storage: MenuStorage::with_key(
                Box::new(MemoryBlobStore::new()) as Box<dyn BlobStore>,
                DEFAULT_STORAGE_KEY,
            ),
            policy: PersistPolicy::default(),
        }
    }

    pub fn policy(&self) -> PersistPolicy {
        self.policy
    }

    pub fn storage_key(&self) -> &str {
        self.storage.key()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Adds a category. The name is trimmed and must be unique ignoring case.
    pub fn add_category(&mut self, name: &str) -> StoreResult<Category> {
        let name = validate_name("name", name)?;

        if self.tables.category_name_taken(&name, None) {
            return Err(duplicate_category(name));
        }

        let category = Category {
            id: self.ids.next_id()?,
            name,
        };

        let mut next = self.tables.clone();
        next.categories.push(category.clone());
        self.commit(next, "add_category")?;

        debug!(category_id = %category.id, name = %category.name, "Category added");
        Ok(category)
    }

    /// Renames a category.
    pub fn update_category(&mut self, id: CategoryId, new_name: &str) -> StoreResult<Category> {
        if self.tables.category(id).is_none() {
            return Err(CoreError::not_found("Category", id).into());
        }

        let name = validate_name("name", new_name)?;

        if self.tables.category_name_taken(&name, Some(id)) {
            return Err(duplicate_category(name));
        }

        let mut next = self.tables.clone();
        let mut updated = None;
        for category in next.categories.iter_mut().filter(|c| c.id == id) {
            category.name = name.clone();
            updated = Some(category.clone());
        }
        let updated = updated.ok_or_else(|| CoreError::not_found("Category", id))?;

        self.commit(next, "update_category")?;

        debug!(category_id = %id, name = %updated.name, "Category renamed");
        Ok(updated)
    }

    /// Deletes a category with its products and their modifiers.
    ///
    /// Unknown ids are a no-op and return an empty report.
    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<CascadeReport> {
        let mut next = self.tables.clone();
        let report = next.remove_category(id);

        if report.is_empty() {
            debug!(category_id = %id, "Delete of unknown category ignored");
            return Ok(report);
        }

        self.commit(next, "delete_category")?;

        debug!(
            category_id = %id,
            products = report.products,
            modifiers = report.modifiers,
            "Category deleted"
        );
        Ok(report)
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product to an existing category.
    pub fn add_product(&mut self, input: &ProductInput) -> StoreResult<Product> {
        let valid = input.validate(&self.tables, None)?;

        let product = Product {
            id: self.ids.next_id()?,
            category_id: valid.category_id,
            name: valid.name,
            description: valid.description,
            price: valid.price,
            image: valid.image,
        };

        let mut next = self.tables.clone();
        next.products.push(product.clone());
        self.commit(next, "add_product")?;

        debug!(
            product_id = %product.id,
            category_id = %product.category_id,
            name = %product.name,
            price = %product.price,
            "Product added"
        );
        Ok(product)
    }

    /// Replaces every field of a product. Its modifiers stay attached, even
    /// when it moves to another category.
    pub fn update_product(&mut self, id: ProductId, input: &ProductInput) -> StoreResult<Product> {
        if self.tables.product(id).is_none() {
            return Err(CoreError::not_found("Product", id).into());
        }

        let valid = input.validate(&self.tables, Some(id))?;
        let product = Product {
            id,
            category_id: valid.category_id,
            name: valid.name,
            description: valid.description,
            price: valid.price,
            image: valid.image,
        };

        let mut next = self.tables.clone();
        for slot in next.products.iter_mut().filter(|p| p.id == id) {
            *slot = product.clone();
        }
        self.commit(next, "update_product")?;

        debug!(product_id = %id, category_id = %product.category_id, "Product updated");
        Ok(product)
    }

    /// Deletes a product and its modifiers. Unknown ids are a no-op.
    pub fn delete_product(&mut self, id: ProductId) -> StoreResult<CascadeReport> {
        let mut next = self.tables.clone();
        let report = next.remove_product(id);

        if report.is_empty() {
            debug!(product_id = %id, "Delete of unknown product ignored");
            return Ok(report);
        }

        self.commit(next, "delete_product")?;

        debug!(product_id = %id, modifiers = report.modifiers, "Product deleted");
        Ok(report)
    }

    // =========================================================================
    // Draft Option Buffer
    // =========================================================================

    /// Appends an option to the draft. A value that is not a finite number
    /// becomes zero.
    pub fn add_option(&mut self, label: &str, value: f64) -> StoreResult<ModifierOption> {
        let label = validate_name("label", label)?;

        let option = ModifierOption {
            id: self.ids.next_id()?,
            label,
            value: option_value(value),
        };
        self.draft.push(option.clone());

        debug!(option_id = %option.id, draft_len = self.draft.len(), "Draft option added");
        Ok(option)
    }

    /// Removes a draft option. Returns whether one was removed.
    pub fn remove_option(&mut self, id: OptionId) -> bool {
        let before = self.draft.len();
        self.draft.retain(|o| o.id != id);
        before != self.draft.len()
    }

    /// The draft options in the order they were added.
    pub fn draft_options(&self) -> &[ModifierOption] {
        &self.draft
    }

    /// Discards the draft.
    pub fn clear_draft(&mut self) {
        if !self.draft.is_empty() {
            debug!(discarded = self.draft.len(), "Draft cleared");
        }
        self.draft.clear();
    }

    // =========================================================================
    // Modifiers
    // =========================================================================

    /// Commits a new modifier whose options are the current draft, then
    /// clears the draft.
    pub fn save_modifier(&mut self, input: &ModifierInput) -> StoreResult<Modifier> {
        let valid = input.validate(&self.tables, &self.draft)?;

        let modifier = Modifier {
            id: self.ids.next_id()?,
            product_id: valid.product_id,
            name: valid.name,
            min: valid.min,
            max: valid.max,
            modifier_type: valid.modifier_type,
            position: valid.position,
            options: valid.options,
        };

        let mut next = self.tables.clone();
        next.modifiers.push(modifier.clone());
        self.commit(next, "save_modifier")?;
        self.draft.clear();

        debug!(
            modifier_id = %modifier.id,
            product_id = %modifier.product_id,
            options = modifier.options.len(),
            "Modifier saved"
        );
        Ok(modifier)
    }

    /// Starts editing a modifier: the draft is replaced by a copy of its
    /// options.
    pub fn edit_modifier(&mut self, id: ModifierId) -> StoreResult<Modifier> {
        let modifier = self
            .tables
            .modifier(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Modifier", id))?;

        self.draft = modifier.options.clone();

        debug!(modifier_id = %id, options = self.draft.len(), "Modifier loaded into draft");
        Ok(modifier)
    }

    /// Replaces a modifier, keeping its id. Options come from the draft,
    /// which is cleared on success.
    pub fn update_modifier(&mut self, id: ModifierId, input: &ModifierInput) -> StoreResult<Modifier> {
        if self.tables.modifier(id).is_none() {
            return Err(CoreError::not_found("Modifier", id).into());
        }

        let valid = input.validate(&self.tables, &self.draft)?;
        let modifier = Modifier {
            id,
            product_id: valid.product_id,
            name: valid.name,
            min: valid.min,
            max: valid.max,
            modifier_type: valid.modifier_type,
            position: valid.position,
            options: valid.options,
        };

        let mut next = self.tables.clone();
        for slot in next.modifiers.iter_mut().filter(|m| m.id == id) {
            *slot = modifier.clone();
        }
        self.commit(next, "update_modifier")?;
        self.draft.clear();

        debug!(modifier_id = %id, options = modifier.options.len(), "Modifier updated");
        Ok(modifier)
    }

    /// Deletes a modifier. Returns whether it existed.
    pub fn delete_modifier(&mut self, id: ModifierId) -> StoreResult<bool> {
        let mut next = self.tables.clone();
        if !next.remove_modifier(id) {
            debug!(modifier_id = %id, "Delete of unknown modifier ignored");
            return Ok(false);
        }

        self.commit(next, "delete_modifier")?;

        debug!(modifier_id = %id, "Modifier deleted");
        Ok(true)
    }

    // =========================================================================
    // Export / Import
    // =========================================================================

    /// Nested export of the current menu, stamped with the current time.
    pub fn generate_export(&self) -> MenuExport {
        self.tables.to_export(Utc::now())
    }

    /// [`generate_export`](Self::generate_export) as pretty-printed JSON.
    pub fn export_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(&self.generate_export())?)
    }

    /// Replaces the whole menu with the contents of an export document.
    ///
    /// On success the draft is cleared and the new counts are returned. On
    /// failure nothing changes, the draft included.
    pub fn import_from_text(&mut self, text: &str) -> StoreResult<MenuStats> {
        let mut ids = self.ids.clone();
        let next = match import_tables(text, &mut ids) {
            Ok(tables) => tables,
            Err(e) => {
                warn!(error = %e, "Menu import rejected");
                return Err(e.into());
            }
        };

        self.commit(next, "import")?;
        self.ids = ids;
        self.draft.clear();

        let stats = self.tables.stats();
        info!(
            categories = stats.categories,
            products = stats.products,
            modifiers = stats.modifiers,
            options = stats.options,
            "Menu imported"
        );
        Ok(stats)
    }

    /// Empties every table and the draft and erases the stored menu.
    pub fn clear(&mut self) -> StoreResult<()> {
        if let Err(e) = self.storage.erase() {
            match self.policy {
                PersistPolicy::Strict => {
                    error!(error = %e, "Failed to erase stored menu, keeping current menu");
                    return Err(e);
                }
                PersistPolicy::Log => {
                    error!(error = %e, "Failed to erase stored menu");
                }
            }
        }

        self.tables = MenuTables::new();
        self.draft.clear();

        info!("Menu cleared");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn categories(&self) -> &[Category] {
        &self.tables.categories
    }

    pub fn products(&self) -> &[Product] {
        &self.tables.products
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.tables.modifiers
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.tables.category(id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.tables.product(id)
    }

    pub fn modifier(&self, id: ModifierId) -> Option<&Modifier> {
        self.tables.modifier(id)
    }

    pub fn products_in(&self, category_id: CategoryId) -> impl Iterator<Item = &Product> {
        self.tables.products_in(category_id)
    }

    pub fn modifiers_for(&self, product_id: ProductId) -> impl Iterator<Item = &Modifier> {
        self.tables.modifiers_for(product_id)
    }

    /// All three tables as they currently are.
    pub fn snapshot(&self) -> &MenuTables {
        &self.tables
    }

    pub fn stats(&self) -> MenuStats {
        self.tables.stats()
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Saves `next` and makes it the current state, following the persist
    /// policy when the save fails.
    fn commit(&mut self, next: MenuTables, action: &'static str) -> StoreResult<()> {
        if let Err(e) = self.storage.save(&next, Utc::now()) {
            match self.policy {
                PersistPolicy::Strict => {
                    error!(action, error = %e, "Failed to persist menu, change discarded");
                    return Err(e);
                }
                PersistPolicy::Log => {
                    error!(action, error = %e, "Failed to persist menu, change kept in memory");
                }
            }
        }

        self.tables = next;
        Ok(())
    }
}

fn duplicate_category(name: String) -> StoreError {
    ValidationError::Duplicate {
        field: "category name".to_string(),
        value: name,
    }
    .into()
}

// =============================================================================
// Unit Tests
// =============================================================================
