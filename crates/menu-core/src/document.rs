//! # Menu Documents
//!
//! The two JSON shapes a menu takes outside the process.
//!
//! ## Export / Import Document
//! ```text
//! {
//!   "menu": [
//!     { "id", "name", "products": [
//!         { "id", "name", "description", "price", "image" | null,
//!           "modifiers": [
//!             { "id", "name", "min", "max", "type", "position",
//!               "options": [ { "id", "label", "value" } ] } ] } ] }
//!   ],
//!   "metadata": { "created", "totalCategories", "totalProducts", "totalModifiers" }
//! }
//! ```
//!
//! Export nests the flat tables and skips categories without products.
//! Import walks the nesting back into flat tables, fixing each child's parent
//! id from its enclosing record and filling defaults for missing fields. It
//! does not re-validate names or prices: the document is trusted.
//!
//! ## Persisted Snapshot
//! ```text
//! { "categories": [...], "products": [...], "modifiers": [...], "lastUpdated" }
//! ```
//! The flat tables as they are, stored under a single key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ids::{CategoryId, IdGenerator, ModifierId, OptionId, ProductId};
use crate::money::Money;
use crate::tables::MenuTables;
use crate::types::{Category, Modifier, ModifierOption, ModifierType, Product};
use crate::{DEFAULT_MODIFIER_MAX, DEFAULT_MODIFIER_MIN, DEFAULT_MODIFIER_POSITION};

// =============================================================================
// Export Document
// =============================================================================

/// The interchange document produced by export and accepted by import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuExport {
    pub menu: Vec<ExportCategory>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportCategory {
    #[ts(type = "number")]
    pub id: CategoryId,
    pub name: String,
    pub products: Vec<ExportProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportProduct {
    #[ts(type = "number")]
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[ts(type = "number")]
    pub price: Money,
    /// `null` when the product has no image.
    pub image: Option<String>,
    pub modifiers: Vec<ExportModifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ExportModifier {
    #[ts(type = "number")]
    pub id: ModifierId,
    pub name: String,
    pub min: u32,
    pub max: u32,
    #[serde(rename = "type")]
    pub modifier_type: ModifierType,
    pub position: i32,
    pub options: Vec<ModifierOption>,
}

/// Summary block written alongside the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    #[ts(as = "String")]
    pub created: DateTime<Utc>,
    pub total_categories: usize,
    pub total_products: usize,
    pub total_modifiers: usize,
}

impl MenuTables {
    /// Builds the nested export projection.
    ///
    /// Pure: `created` is supplied by the caller and nothing is mutated.
    /// Categories appear in table order and are omitted when they have no
    /// products. Metadata counts every row in the tables, including rows of
    /// omitted categories.
    pub fn to_export(&self, created: DateTime<Utc>) -> MenuExport {
        let menu = self
            .categories
            .iter()
            .filter_map(|category| {
                let products: Vec<ExportProduct> = self
                    .products_in(category.id)
                    .map(|product| self.export_product(product))
                    .collect();

                if products.is_empty() {
                    return None;
                }

                Some(ExportCategory {
                    id: category.id,
                    name: category.name.clone(),
                    products,
                })
            })
            .collect();

        MenuExport {
            menu,
            metadata: ExportMetadata {
                created,
                total_categories: self.categories.len(),
                total_products: self.products.len(),
                total_modifiers: self.modifiers.len(),
            },
        }
    }

    fn export_product(&self, product: &Product) -> ExportProduct {
        ExportProduct {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image_url().map(str::to_string),
            modifiers: self
                .modifiers_for(product.id)
                .map(|modifier| ExportModifier {
                    id: modifier.id,
                    name: modifier.name.clone(),
                    min: modifier.min,
                    max: modifier.max,
                    modifier_type: modifier.modifier_type,
                    position: modifier.position,
                    options: modifier.options.clone(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// Import
// =============================================================================

/// Rebuilds flat tables from an export document.
///
/// ## Rules
/// - `text` must be JSON whose top level has a `menu` array, otherwise
///   [`CoreError::Format`]
/// - ids are taken from the document when present; missing ids are drawn
///   from `ids`, which is first advanced past every id in the document;
///   [`CoreError::IdsExhausted`] if the document already uses `i64::MAX`
/// - prices and option values keep up to six fractional digits as written
/// - `categoryId` / `productId` come from the enclosing record
/// - defaults: description `""`, price `0`, image `""`, min `0`, max `1`,
///   type `SINGLE`, position `1`, option value `0`
/// - missing names and labels become `""`; nothing is re-validated
/// - numbers may also be given as numeric strings; anything else that is
///   not usable takes the default
///
/// ## Example
/// ```rust
/// use menu_core::document::import_tables;
/// use menu_core::IdGenerator;
///
/// let text = r#"{"menu":[{"id":1,"name":"Food","products":[]}]}"#;
/// let tables = import_tables(text, &mut IdGenerator::new()).unwrap();
/// assert_eq!(tables.categories[0].name, "Food");
///
/// assert!(import_tables("not json", &mut IdGenerator::new()).is_err());
/// ```
pub fn import_tables(text: &str, ids: &mut IdGenerator) -> CoreResult<MenuTables> {
    let document: Value = serde_json::from_str(text).map_err(|e| CoreError::format(e.to_string()))?;

    let menu = document
        .get("menu")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::format("top level must contain a `menu` array"))?;

    observe_ids(&document, ids);

    let empty = Map::new();
    let mut tables = MenuTables::new();

    for category in menu {
        let category = category.as_object().unwrap_or(&empty);
        let category_id = CategoryId::new(id_or_next(category, ids)?);

        tables.categories.push(Category {
            id: category_id,
            name: text_field(category, "name"),
        });

        for product in array_field(category, "products") {
            let product = product.as_object().unwrap_or(&empty);
            let product_id = ProductId::new(id_or_next(product, ids)?);

            tables.products.push(Product {
                id: product_id,
                category_id,
                name: text_field(product, "name"),
                description: text_field(product, "description"),
                price: money_field(product, "price"),
                image: text_field(product, "image"),
            });

            for modifier in array_field(product, "modifiers") {
                let modifier = modifier.as_object().unwrap_or(&empty);
                let modifier_id = ModifierId::new(id_or_next(modifier, ids)?);

                let options = array_field(modifier, "options")
                    .iter()
                    .map(|option| {
                        let option = option.as_object().unwrap_or(&empty);
                        Ok(ModifierOption {
                            id: OptionId::new(id_or_next(option, ids)?),
                            label: text_field(option, "label"),
                            value: money_field(option, "value"),
                        })
                    })
                    .collect::<CoreResult<Vec<_>>>()?;

                tables.modifiers.push(Modifier {
                    id: modifier_id,
                    product_id,
                    name: text_field(modifier, "name"),
                    min: u32_field(modifier, "min").unwrap_or(DEFAULT_MODIFIER_MIN),
                    max: u32_field(modifier, "max").unwrap_or(DEFAULT_MODIFIER_MAX),
                    modifier_type: modifier
                        .get("type")
                        .and_then(Value::as_str)
                        .and_then(ModifierType::parse)
                        .unwrap_or_default(),
                    position: i32_field(modifier, "position").unwrap_or(DEFAULT_MODIFIER_POSITION),
                    options,
                });
            }
        }
    }

    Ok(tables)
}

/// Advances `ids` past every `id` field anywhere in the document.
fn observe_ids(value: &Value, ids: &mut IdGenerator) {
    match value {
        Value::Object(map) => {
            if let Some(id) = map.get("id").and_then(as_integer) {
                ids.observe(id);
            }
            for child in map.values() {
                observe_ids(child, ids);
            }
        }
        Value::Array(items) => {
            for item in items {
                observe_ids(item, ids);
            }
        }
        _ => {}
    }
}

fn id_or_next(record: &Map<String, Value>, ids: &mut IdGenerator) -> CoreResult<i64> {
    match record.get("id").and_then(as_integer) {
        Some(id) => Ok(id),
        None => ids.next_raw(),
    }
}

fn array_field<'a>(record: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn text_field(record: &Map<String, Value>, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn money_field(record: &Map<String, Value>, key: &str) -> Money {
    record
        .get(key)
        .and_then(as_number)
        .and_then(Money::from_decimal)
        .unwrap_or_default()
}

fn u32_field(record: &Map<String, Value>, key: &str) -> Option<u32> {
    record
        .get(key)
        .and_then(as_integer)
        .and_then(|n| u32::try_from(n).ok())
}

fn i32_field(record: &Map<String, Value>, key: &str) -> Option<i32> {
    record
        .get(key)
        .and_then(as_integer)
        .and_then(|n| i32::try_from(n).ok())
}

/// A JSON number, or a string holding one.
fn as_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// A whole number, given as an integer, an integral float or a string.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    as_number(value)
        .filter(|n| n.fract() == 0.0 && n.abs() < i64::MAX as f64)
        .map(|n| n as i64)
}

// =============================================================================
// Persisted Snapshot
// =============================================================================

/// The persisted form of the store: flat tables plus a write timestamp.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl MenuSnapshot {
    /// Moves the snapshot's rows into tables.
    pub fn into_tables(self) -> MenuTables {
        MenuTables {
            categories: self.categories,
            products: self.products,
            modifiers: self.modifiers,
        }
    }
}

/// Borrowed view used to write a snapshot without copying the tables.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSnapshotRef<'a> {
    pub categories: &'a [Category],
    pub products: &'a [Product],
    pub modifiers: &'a [Modifier],
    pub last_updated: DateTime<Utc>,
}

impl<'a> MenuSnapshotRef<'a> {
    pub fn new(tables: &'a MenuTables, last_updated: DateTime<Utc>) -> Self {
        MenuSnapshotRef {
            categories: &tables.categories,
            products: &tables.products,
            modifiers: &tables.modifiers,
            last_updated,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tables() -> MenuTables {
        MenuTables {
            categories: vec![
                Category {
                    id: CategoryId::new(1),
                    name: "Drinks".to_string(),
                },
                Category {
                    id: CategoryId::new(2),
                    name: "Empty".to_string(),
                },
            ],
            products: vec![Product {
                id: ProductId::new(10),
                category_id: CategoryId::new(1),
                name: "Cola".to_string(),
                description: "Cold soda".to_string(),
                price: Money::from_cents(250),
                image: String::new(),
            }],
            modifiers: vec![Modifier {
                id: ModifierId::new(100),
                product_id: ProductId::new(10),
                name: "Size".to_string(),
                min: 1,
                max: 1,
                modifier_type: ModifierType::Single,
                position: 2,
                options: vec![
                    ModifierOption {
                        id: OptionId::new(1000),
                        label: "Small".to_string(),
                        value: Money::zero(),
                    },
                    ModifierOption {
                        id: OptionId::new(1001),
                        label: "Large".to_string(),
                        value: Money::from_cents(75),
                    },
                ],
            }],
        }
    }

    #[test]
    fn test_export_omits_empty_categories() {
        let export = sample_tables().to_export(Utc::now());

        assert_eq!(export.menu.len(), 1);
        assert_eq!(export.menu[0].name, "Drinks");
        assert_eq!(export.menu[0].products[0].modifiers[0].options.len(), 2);

        // Metadata still counts the live tables
        assert_eq!(export.metadata.total_categories, 2);
        assert_eq!(export.metadata.total_products, 1);
        assert_eq!(export.metadata.total_modifiers, 1);
    }

    #[test]
    fn test_export_wire_shape() {
        let json = serde_json::to_value(sample_tables().to_export(Utc::now())).unwrap();
        let product = &json["menu"][0]["products"][0];

        assert_eq!(product["price"], 2.5);
        assert!(product["image"].is_null());
        assert!(product.get("categoryId").is_none());
        assert_eq!(product["modifiers"][0]["type"], "SINGLE");
        assert!(product["modifiers"][0].get("productId").is_none());
        assert!(json["metadata"]["totalCategories"].is_number());
        assert!(json["metadata"]["created"].is_string());
    }

    #[test]
    fn test_import_round_trips_export() {
        let mut tables = sample_tables();
        tables.categories.pop(); // no empty categories
        let text = serde_json::to_string(&tables.to_export(Utc::now())).unwrap();

        let imported = import_tables(&text, &mut IdGenerator::new()).unwrap();
        assert_eq!(imported, tables);
    }

    #[test]
    fn test_import_applies_defaults() {
        let text = r#"{"menu":[{"id":1,"name":"Food","products":[{"id":2,"name":"Taco","price":3,"modifiers":[{"id":3,"name":"Spice","options":[{"id":4,"label":"Mild","value":0}]}]}]}]}"#;
        let tables = import_tables(text, &mut IdGenerator::new()).unwrap();

        assert_eq!(tables.categories.len(), 1);
        let product = &tables.products[0];
        assert_eq!(product.category_id, CategoryId::new(1));
        assert_eq!(product.description, "");
        assert_eq!(product.image, "");
        assert_eq!(product.price, Money::from_cents(300));

        let modifier = &tables.modifiers[0];
        assert_eq!(modifier.product_id, ProductId::new(2));
        assert_eq!(modifier.min, 0);
        assert_eq!(modifier.max, 1);
        assert_eq!(modifier.modifier_type, ModifierType::Single);
        assert_eq!(modifier.position, 1);
        assert_eq!(modifier.options[0].label, "Mild");
        assert_eq!(modifier.options[0].value, Money::zero());
    }

    #[test]
    fn test_import_rejects_bad_documents() {
        let mut ids = IdGenerator::new();
        assert!(matches!(import_tables("not json", &mut ids), Err(CoreError::Format(_))));
        assert!(matches!(import_tables("{}", &mut ids), Err(CoreError::Format(_))));
        assert!(matches!(
            import_tables(r#"{"menu":{}}"#, &mut ids),
            Err(CoreError::Format(_))
        ));
        assert!(matches!(import_tables("[]", &mut ids), Err(CoreError::Format(_))));
    }

    #[test]
    fn test_import_generates_missing_ids_past_document_ids() {
        let far = Utc::now().timestamp_millis() + 10_000_000;
        let text = format!(
            r#"{{"menu":[{{"name":"A"}},{{"id":{},"name":"B"}}]}}"#,
            far
        );
        let tables = import_tables(&text, &mut IdGenerator::new()).unwrap();

        assert_eq!(tables.categories[1].id, CategoryId::new(far));
        assert!(tables.categories[0].id.get() > far);
    }

    #[test]
    fn test_import_keeps_sub_cent_amounts() {
        let text = r#"{"menu":[{"id":1,"name":"Food","products":[{"id":2,"name":"Taco","price":0.125,
            "modifiers":[{"id":3,"name":"Salsa","options":[{"id":4,"label":"Verde","value":0.005}]}]}]}]}"#;
        let tables = import_tables(text, &mut IdGenerator::new()).unwrap();

        let export = serde_json::to_value(tables.to_export(Utc::now())).unwrap();
        let product = &export["menu"][0]["products"][0];
        assert_eq!(product["price"], serde_json::json!(0.125));
        assert_eq!(product["modifiers"][0]["options"][0]["value"], serde_json::json!(0.005));
    }

    #[test]
    fn test_import_fails_when_ids_are_exhausted() {
        let text = format!(r#"{{"menu":[{{"id":{},"name":"A"}},{{"name":"B"}}]}}"#, i64::MAX);
        let result = import_tables(&text, &mut IdGenerator::new());
        assert!(matches!(result, Err(CoreError::IdsExhausted)));

        // Every id present is fine
        let text = format!(r#"{{"menu":[{{"id":{},"name":"A"}}]}}"#, i64::MAX);
        let tables = import_tables(&text, &mut IdGenerator::new()).unwrap();
        assert_eq!(tables.categories[0].id, CategoryId::new(i64::MAX));
    }

    #[test]
    fn test_import_is_lenient_with_field_types() {
        let text = r#"{"menu":[{"id":"7","products":[{"id":8,"name":"Fries","price":"1.5",
            "modifiers":[{"id":9,"name":"Salt","min":-1,"max":"3","type":"multiple","position":2.0}]}]}]}"#;
        let tables = import_tables(text, &mut IdGenerator::new()).unwrap();

        assert_eq!(tables.categories[0].id, CategoryId::new(7));
        assert_eq!(tables.categories[0].name, "");
        assert_eq!(tables.products[0].price, Money::from_cents(150));

        let modifier = &tables.modifiers[0];
        assert_eq!(modifier.min, 0);
        assert_eq!(modifier.max, 3);
        assert_eq!(modifier.modifier_type, ModifierType::Multiple);
        assert_eq!(modifier.position, 2);
        assert!(modifier.options.is_empty());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let tables = sample_tables();
        let now = Utc::now();
        let json = serde_json::to_string(&MenuSnapshotRef::new(&tables, now)).unwrap();
        assert!(json.contains("\"lastUpdated\""));
        assert!(json.contains("\"categoryId\""));

        let snapshot: MenuSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.last_updated, Some(now));
        assert_eq!(snapshot.into_tables(), tables);
    }
}
