//! # Editor Session
//!
//! Add-or-edit state for the menu editor forms.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │                    begin_*_edit(id)                                     │
//! │        ┌──────┐ ─────────────────────────► ┌────────────────────┐      │
//! │        │ Idle │                            │ Editing{Kind}(id)  │      │
//! │        └──────┘ ◄───────────────────────── └────────────────────┘      │
//! │           │      submit_{kind} ok / cancel()        │                  │
//! │           │                                          │                  │
//! │           │ submit_*: add                            │ submit_{kind}:   │
//! │           ▼                                          ▼ update by id     │
//! │                                                                         │
//! │  • A failed submit keeps the current mode                              │
//! │  • Submitting another kind while editing is a ModeMismatch             │
//! │  • Leaving modifier editing without saving clears the draft            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session holds no menu data. Every method takes the store it acts on,
//! so the store stays the single owner of the tables.

use menu_core::{
    Category, CategoryId, CoreError, Modifier, ModifierId, ModifierInput, Product, ProductId, ProductInput,
    ValidationError,
};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::MenuStore;

/// What the editor is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Forms add new records.
    #[default]
    Idle,
    EditingCategory(CategoryId),
    EditingProduct(ProductId),
    EditingModifier(ModifierId),
}

impl EditMode {
    /// Name of the entity kind being edited, or `"nothing"` when idle.
    pub fn kind(&self) -> &'static str {
        match self {
            EditMode::Idle => "nothing",
            EditMode::EditingCategory(_) => "category",
            EditMode::EditingProduct(_) => "product",
            EditMode::EditingModifier(_) => "modifier",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, EditMode::Idle)
    }
}

/// Editor state for one user session.
#[derive(Debug, Default)]
pub struct EditorSession {
    mode: EditMode,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    // =========================================================================
    // Entering Edit Mode
    // =========================================================================

    /// Starts editing a category and returns it for the form.
    pub fn begin_category_edit(&mut self, store: &mut MenuStore, id: CategoryId) -> StoreResult<Category> {
        let category = store
            .category(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Category", id))?;

        self.transition(store, EditMode::EditingCategory(id));
        Ok(category)
    }

    /// Starts editing a product and returns it for the form.
    pub fn begin_product_edit(&mut self, store: &mut MenuStore, id: ProductId) -> StoreResult<Product> {
        let product = store
            .product(id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("Product", id))?;

        self.transition(store, EditMode::EditingProduct(id));
        Ok(product)
    }

    /// Starts editing a modifier; its options replace the store's draft.
    pub fn begin_modifier_edit(&mut self, store: &mut MenuStore, id: ModifierId) -> StoreResult<Modifier> {
        let modifier = store.edit_modifier(id)?;
        self.mode = EditMode::EditingModifier(id);
        debug!(mode = ?self.mode, "Editor mode changed");
        Ok(modifier)
    }

    // =========================================================================
    // Submitting Forms
    // =========================================================================

    /// Adds a category when idle, renames the edited one otherwise.
    pub fn submit_category(&mut self, store: &mut MenuStore, name: &str) -> StoreResult<Category> {
        let category = match self.mode {
            EditMode::Idle => store.add_category(name)?,
            EditMode::EditingCategory(id) => store.update_category(id, name)?,
            other => return Err(mismatch("category", other)),
        };

        self.mode = EditMode::Idle;
        Ok(category)
    }

    /// Adds a product when idle, replaces the edited one otherwise.
    pub fn submit_product(&mut self, store: &mut MenuStore, input: &ProductInput) -> StoreResult<Product> {
        let product = match self.mode {
            EditMode::Idle => store.add_product(input)?,
            EditMode::EditingProduct(id) => store.update_product(id, input)?,
            other => return Err(mismatch("product", other)),
        };

        self.mode = EditMode::Idle;
        Ok(product)
    }

    /// Saves the draft as a new modifier when idle, or into the edited one.
    pub fn submit_modifier(&mut self, store: &mut MenuStore, input: &ModifierInput) -> StoreResult<Modifier> {
        let modifier = match self.mode {
            EditMode::Idle => store.save_modifier(input)?,
            EditMode::EditingModifier(id) => store.update_modifier(id, input)?,
            other => return Err(mismatch("modifier", other)),
        };

        self.mode = EditMode::Idle;
        Ok(modifier)
    }

    /// Abandons the current edit.
    pub fn cancel(&mut self, store: &mut MenuStore) {
        self.transition(store, EditMode::Idle);
    }

    fn transition(&mut self, store: &mut MenuStore, next: EditMode) {
        if matches!(self.mode, EditMode::EditingModifier(_)) {
            store.clear_draft();
        }
        self.mode = next;
        debug!(mode = ?self.mode, "Editor mode changed");
    }
}

fn mismatch(submitted: &str, editing: EditMode) -> StoreError {
    ValidationError::ModeMismatch {
        submitted: submitted.to_string(),
        editing: editing.kind().to_string(),
    }
    .into()
}
