//! # Command Inputs
//!
//! The field sets the presentation layer submits for products and
//! modifiers, and the checks that need the current tables (parent
//! references, per-category name uniqueness).
//!
//! Validation never mutates anything: it either returns the cleaned-up
//! record fields or the first rule that failed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::ids::{CategoryId, ProductId};
use crate::money::Money;
use crate::tables::MenuTables;
use crate::types::{ModifierOption, ModifierType};
use crate::validation::{normalize_image, validate_modifier_bounds, validate_name, validate_price};

// =============================================================================
// Product Input
// =============================================================================

/// Fields for creating or replacing a product.
///
/// `price` is the raw number from the form; it is checked for being finite
/// and non-negative before it becomes [`Money`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
}

/// Product fields after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidProduct {
    pub category_id: CategoryId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
}

impl ProductInput {
    /// Validates against the current tables.
    ///
    /// ## Rules
    /// - `category_id` references an existing category
    /// - `name` and `description` are non-empty after trim
    /// - `price` is a finite, non-negative number
    /// - no other product in the category has the same name (ignoring case);
    ///   `except` excludes the product being updated
    ///
    /// A name collision is reported as [`CoreError::Duplicate`]; all other
    /// failures are [`CoreError::Validation`].
    pub fn validate(&self, tables: &MenuTables, except: Option<ProductId>) -> CoreResult<ValidProduct> {
        if tables.category(self.category_id).is_none() {
            return Err(ValidationError::UnknownReference {
                field: "categoryId".to_string(),
                entity: "category".to_string(),
            }
            .into());
        }

        let name = validate_name("name", &self.name)?;
        let description = validate_name("description", &self.description)?;
        let price = validate_price(self.price)?;

        if tables.product_name_taken(self.category_id, &name, except) {
            return Err(CoreError::duplicate("Product", name));
        }

        Ok(ValidProduct {
            category_id: self.category_id,
            name,
            description,
            price,
            image: normalize_image(self.image.as_deref()),
        })
    }
}

// =============================================================================
// Modifier Input
// =============================================================================

/// Fields for creating or replacing a modifier. The options come from the
/// store's draft buffer, not from this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierInput {
    pub product_id: ProductId,
    pub name: String,
    pub min: u32,
    pub max: u32,
    #[serde(rename = "type", default)]
    pub modifier_type: ModifierType,
    #[serde(default = "default_position")]
    pub position: i32,
}

fn default_position() -> i32 {
    crate::DEFAULT_MODIFIER_POSITION
}

/// Modifier fields after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidModifier {
    pub product_id: ProductId,
    pub name: String,
    pub min: u32,
    pub max: u32,
    pub modifier_type: ModifierType,
    pub position: i32,
    pub options: Vec<ModifierOption>,
}

impl ModifierInput {
    /// Validates against the current tables and the draft options.
    ///
    /// ## Rules
    /// - `product_id` references an existing product
    /// - `name` is non-empty after trim
    /// - `min <= max`, whatever the type and position
    /// - the draft holds at least one option
    ///
    /// On success the draft is copied into the result, preserving its order.
    pub fn validate(&self, tables: &MenuTables, draft: &[ModifierOption]) -> CoreResult<ValidModifier> {
        if tables.product(self.product_id).is_none() {
            return Err(ValidationError::UnknownReference {
                field: "productId".to_string(),
                entity: "product".to_string(),
            }
            .into());
        }

        let name = validate_name("name", &self.name)?;
        validate_modifier_bounds(self.min, self.max)?;

        if draft.is_empty() {
            return Err(ValidationError::EmptyOptions.into());
        }

        Ok(ValidModifier {
            product_id: self.product_id,
            name,
            min: self.min,
            max: self.max,
            modifier_type: self.modifier_type,
            position: self.position,
            options: draft.to_vec(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
