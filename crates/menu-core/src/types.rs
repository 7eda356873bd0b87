//! # Domain Types
//!
//! Core domain types used throughout Menu Builder.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │     Product     │   │    Modifier     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  category_id    │◄──│  product_id     │       │
//! │  │  name           │   │  id             │   │  id             │       │
//! │  └─────────────────┘   │  name           │   │  name, min, max │       │
//! │                        │  description    │   │  type, position │       │
//! │                        │  price (Money)  │   │  options ───────┼──┐    │
//! │                        │  image          │   └─────────────────┘  │    │
//! │                        └─────────────────┘                        ▼    │
//! │                                              ┌─────────────────────┐   │
//! │                                              │  ModifierOption     │   │
//! │                                              │  id, label, value   │   │
//! │                                              └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records point "up" to their parent by id. Options are the exception: they
//! are owned by their modifier and never referenced from anywhere else.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{CategoryId, ModifierId, OptionId, ProductId};
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A top-level menu section ("Drinks", "Burgers").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    #[ts(type = "number")]
    pub id: CategoryId,

    /// Display name, unique among categories ignoring case.
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[ts(type = "number")]
    pub id: ProductId,

    /// Owning category.
    #[ts(type = "number")]
    pub category_id: CategoryId,

    /// Display name, unique within its category ignoring case.
    pub name: String,

    pub description: String,

    /// Base price before modifier surcharges.
    #[ts(type = "number")]
    pub price: Money,

    /// Image URL; empty when the product has no image.
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Returns the image URL, or `None` when no image is set.
    pub fn image_url(&self) -> Option<&str> {
        if self.image.is_empty() {
            None
        } else {
            Some(&self.image)
        }
    }
}

// =============================================================================
// Modifier Type
// =============================================================================

/// Selection behavior of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModifierType {
    /// Radio style: pick one option.
    #[default]
    Single,
    /// Checkbox style: pick several options.
    Multiple,
}

impl ModifierType {
    /// Parses a type name ignoring case. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SINGLE" => Some(ModifierType::Single),
            "MULTIPLE" => Some(ModifierType::Multiple),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModifierType::Single => write!(f, "SINGLE"),
            ModifierType::Multiple => write!(f, "MULTIPLE"),
        }
    }
}

// =============================================================================
// Modifier Option
// =============================================================================

/// One choice inside a modifier ("Large", "Extra cheese").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ModifierOption {
    #[ts(type = "number")]
    pub id: OptionId,

    pub label: String,

    /// Surcharge added to the product price when chosen.
    #[ts(type = "number")]
    pub value: Money,
}

// =============================================================================
// Modifier
// =============================================================================

/// A group of options attached to a product ("Size", "Toppings").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Modifier {
    #[ts(type = "number")]
    pub id: ModifierId,

    /// Owning product.
    #[ts(type = "number")]
    pub product_id: ProductId,

    pub name: String,

    /// Minimum number of options the customer must pick.
    pub min: u32,

    /// Maximum number of options the customer may pick (`>= min`).
    pub max: u32,

    #[serde(rename = "type")]
    pub modifier_type: ModifierType,

    /// Display order among the product's modifiers. Not unique.
    pub position: i32,

    pub options: Vec<ModifierOption>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_type_default() {
        assert_eq!(ModifierType::default(), ModifierType::Single);
    }

    #[test]
    fn test_modifier_type_parse_ignores_case() {
        assert_eq!(ModifierType::parse("multiple"), Some(ModifierType::Multiple));
        assert_eq!(ModifierType::parse(" Single "), Some(ModifierType::Single));
        assert_eq!(ModifierType::parse("many"), None);
    }

    #[test]
    fn test_modifier_serializes_wire_names() {
        let modifier = Modifier {
            id: ModifierId::new(3),
            product_id: ProductId::new(2),
            name: "Size".to_string(),
            min: 1,
            max: 1,
            modifier_type: ModifierType::Multiple,
            position: 1,
            options: vec![ModifierOption {
                id: OptionId::new(4),
                label: "Large".to_string(),
                value: Money::from_cents(150),
            }],
        };

        let json = serde_json::to_value(&modifier).unwrap();
        assert_eq!(json["productId"], 2);
        assert_eq!(json["type"], "MULTIPLE");
        assert_eq!(json["options"][0]["value"], 1.5);
    }

    #[test]
    fn test_product_image_url() {
        let mut product = Product {
            id: ProductId::new(1),
            category_id: CategoryId::new(1),
            name: "Cola".to_string(),
            description: "Cold soda".to_string(),
            price: Money::from_cents(250),
            image: String::new(),
        };
        assert_eq!(product.image_url(), None);

        product.image = "https://example.com/cola.png".to_string();
        assert_eq!(product.image_url(), Some("https://example.com/cola.png"));
    }
}
