//! # menu-core: Pure Menu Model for Menu Builder
//!
//! This crate is the **heart** of Menu Builder. It contains the menu data
//! model and its consistency rules as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Menu Builder Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (web editor)                    │   │
//! │  │   Categories ──► Products ──► Modifiers ──► Export / Import     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    menu-store (MenuStore)                       │   │
//! │  │    add_category, delete_product, save_modifier, import, ...     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ menu-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌──────────┐ ┌────────┐ │   │
//! │  │   │  types  │ │  money  │ │  tables  │ │ document │ │  ids   │ │   │
//! │  │   │Category │ │  Money  │ │ cascades │ │  export  │ │IdGen   │ │   │
//! │  │   │Product  │ │         │ │ lookups  │ │  import  │ │        │ │   │
//! │  │   └─────────┘ └─────────┘ └──────────┘ └──────────┘ └────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Modifier, ModifierOption)
//! - [`money`] - Money type with integer arithmetic, decimal on the wire
//! - [`ids`] - Typed ids and the monotonic id generator
//! - [`tables`] - The three linked tables with lookups and cascades
//! - [`input`] - Command inputs and their validation against the tables
//! - [`document`] - Export projection, import reconstruction, snapshot
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level rules
//!
//! ## Example Usage
//!
//! ```rust
//! use menu_core::money::Money;
//!
//! let price = Money::from_decimal(2.5).unwrap();
//! assert_eq!(price, Money::from_cents(250));
//! assert_eq!(price.to_string(), "2.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod document;
pub mod error;
pub mod ids;
pub mod input;
pub mod money;
pub mod tables;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use document::{MenuExport, MenuSnapshot};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ids::{CategoryId, IdGenerator, ModifierId, OptionId, ProductId};
pub use input::{ModifierInput, ProductInput};
pub use money::Money;
pub use tables::{CascadeReport, MenuStats, MenuTables};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum selections applied to an imported modifier that omits `min`.
pub const DEFAULT_MODIFIER_MIN: u32 = 0;

/// Maximum selections applied to an imported modifier that omits `max`.
pub const DEFAULT_MODIFIER_MAX: u32 = 1;

/// Display position applied to an imported modifier that omits `position`.
pub const DEFAULT_MODIFIER_POSITION: i32 = 1;
