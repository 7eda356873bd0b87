//! # Error Types
//!
//! Domain-specific error types for menu-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  menu-core errors (this file)                                          │
//! │  ├── CoreError        - Domain errors returned by every command        │
//! │  │   ├── Validation   - Input fails a field or uniqueness rule         │
//! │  │   ├── Duplicate    - Product name collides within its category      │
//! │  │   ├── NotFound     - Referenced id does not exist                   │
//! │  │   ├── Format       - Import text unparseable / wrong shape          │
//! │  │   └── IdsExhausted - No id above the largest one in use is left     │
//! │  └── ValidationError  - Field-level failures                           │
//! │                                                                         │
//! │  menu-store errors (separate crate)                                    │
//! │  └── StoreError       - Core errors + storage/config failures          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → Presentation         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Caller Guidance
//! - `Validation` / `Duplicate`: correct the input and retry
//! - `NotFound`: treat as stale state and refresh
//! - `Format`: show the parse failure; existing state is untouched
//! - `IdsExhausted`: the menu holds an id of `i64::MAX`; clear or re-import
//!   it with smaller ids
//!
//! None of these are fatal, and a command that reports one leaves the
//! tables exactly as they were.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Menu model errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed a field-level or uniqueness rule.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A product with the same name (ignoring case) already exists in the
    /// target category.
    #[error("{entity} '{name}' already exists")]
    Duplicate { entity: String, name: String },

    /// Referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Updating a record that was deleted in the meantime
    /// - Starting an edit from a stale view
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Import text is not valid JSON or lacks the `menu` array.
    #[error("Invalid menu document: {0}")]
    Format(String),

    /// The largest possible id is already in use, so no fresh id can be
    /// issued without repeating one.
    #[error("No unused ids left, the menu already holds id {}", i64::MAX)]
    IdsExhausted,
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, name: impl Into<String>) -> Self {
        CoreError::Duplicate {
            entity: entity.into(),
            name: name.into(),
        }
    }

    /// Creates a Format error.
    pub fn format(reason: impl Into<String>) -> Self {
        CoreError::Format(reason.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is negative where only zero or more is allowed.
    #[error("{field} must be zero or greater")]
    MustBeNonNegative { field: String },

    /// Input is not a usable number (NaN, infinite, out of range).
    #[error("{field} must be a valid number")]
    InvalidNumber { field: String },

    /// Lower bound exceeds upper bound.
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvalidRange { field: String, min: u32, max: u32 },

    /// Modifier save attempted with an empty draft option list.
    #[error("a modifier needs at least one option")]
    EmptyOptions,

    /// A parent reference points at a record that does not exist.
    #[error("{field} does not reference an existing {entity}")]
    UnknownReference { field: String, entity: String },

    /// Duplicate value (e.g., category name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Submitted entity kind does not match the record being edited.
    #[error("cannot submit a {submitted} while editing a {editing}")]
    ModeMismatch { submitted: String, editing: String },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::not_found("Category", 42);
        assert_eq!(err.to_string(), "Category not found: 42");

        let err = CoreError::duplicate("Product", "Cola");
        assert_eq!(err.to_string(), "Product 'Cola' already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("name");
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidRange {
            field: "modifier".to_string(),
            min: 3,
            max: 1,
        };
        assert_eq!(
            err.to_string(),
            "modifier: minimum 3 is greater than maximum 1"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::EmptyOptions.into();
        assert!(matches!(
            core_err,
            CoreError::Validation(ValidationError::EmptyOptions)
        ));
    }
}
