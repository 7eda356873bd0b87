//! # Menu Tables
//!
//! The three flat, linked tables that make up a menu, with lookups and the
//! cascade rules for deletion.
//!
//! ## Cascade Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  remove_category(C)                                                    │
//! │     ├── drop C                                                         │
//! │     ├── drop every Product P with P.category_id == C                   │
//! │     └── drop every Modifier M with M.product_id in {dropped P}         │
//! │                                                                         │
//! │  remove_product(P)                                                     │
//! │     ├── drop P                                                         │
//! │     └── drop every Modifier M with M.product_id == P                   │
//! │                                                                         │
//! │  remove_modifier(M)                                                    │
//! │     └── drop M (options go with it)                                    │
//! │                                                                         │
//! │  Unknown ids remove nothing. Unrelated rows keep their order.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ids::{CategoryId, ModifierId, ProductId};
use crate::types::{Category, Modifier, Product};
use crate::validation::names_match;

/// Category, product and modifier tables in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuTables {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub modifiers: Vec<Modifier>,
}

/// What a delete actually removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeReport {
    pub categories: usize,
    pub products: usize,
    pub modifiers: usize,
}

impl CascadeReport {
    /// True when the delete matched nothing.
    pub fn is_empty(&self) -> bool {
        self.categories == 0 && self.products == 0 && self.modifiers == 0
    }
}

/// Row counts per table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuStats {
    pub categories: usize,
    pub products: usize,
    pub modifiers: usize,
    pub options: usize,
}

impl MenuTables {
    /// Creates empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when all three tables are empty.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.products.is_empty() && self.modifiers.is_empty()
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn modifier(&self, id: ModifierId) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == id)
    }

    /// Products of one category, in table order.
    pub fn products_in(&self, category_id: CategoryId) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| p.category_id == category_id)
    }

    /// Modifiers of one product, in table order.
    pub fn modifiers_for(&self, product_id: ProductId) -> impl Iterator<Item = &Modifier> {
        self.modifiers
            .iter()
            .filter(move |m| m.product_id == product_id)
    }

    /// Checks whether another category already uses `name` (ignoring case).
    pub fn category_name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .iter()
            .any(|c| Some(c.id) != except && names_match(&c.name, name))
    }

    /// Checks whether another product of `category_id` already uses `name`
    /// (ignoring case).
    pub fn product_name_taken(
        &self,
        category_id: CategoryId,
        name: &str,
        except: Option<ProductId>,
    ) -> bool {
        self.products_in(category_id)
            .any(|p| Some(p.id) != except && names_match(&p.name, name))
    }

    // =========================================================================
    // Cascading Deletes
    // =========================================================================

    /// Removes a category, its products and their modifiers.
    pub fn remove_category(&mut self, id: CategoryId) -> CascadeReport {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let categories = before - self.categories.len();

        let doomed: HashSet<ProductId> = self.products_in(id).map(|p| p.id).collect();
        let before = self.products.len();
        self.products.retain(|p| p.category_id != id);
        let products = before - self.products.len();

        let before = self.modifiers.len();
        self.modifiers.retain(|m| !doomed.contains(&m.product_id));
        let modifiers = before - self.modifiers.len();

        CascadeReport {
            categories,
            products,
            modifiers,
        }
    }

    /// Removes a product and its modifiers.
    pub fn remove_product(&mut self, id: ProductId) -> CascadeReport {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let products = before - self.products.len();

        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.product_id != id);
        let modifiers = before - self.modifiers.len();

        CascadeReport {
            categories: 0,
            products,
            modifiers,
        }
    }

    /// Removes a single modifier. Returns whether it existed.
    pub fn remove_modifier(&mut self, id: ModifierId) -> bool {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.id != id);
        self.modifiers.len() != before
    }

    // =========================================================================
    // Summary
    // =========================================================================

    /// Row counts, including options nested in modifiers.
    pub fn stats(&self) -> MenuStats {
        MenuStats {
            categories: self.categories.len(),
            products: self.products.len(),
            modifiers: self.modifiers.len(),
            options: self.modifiers.iter().map(|m| m.options.len()).sum(),
        }
    }

    /// Largest id of any kind, used to keep generated ids ahead of loaded
    /// data.
    pub fn max_id(&self) -> Option<i64> {
        let categories = self.categories.iter().map(|c| c.id.get());
        let products = self.products.iter().map(|p| p.id.get());
        let modifiers = self.modifiers.iter().flat_map(|m| {
            std::iter::once(m.id.get()).chain(m.options.iter().map(|o| o.id.get()))
        });
        categories.chain(products).chain(modifiers).max()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
