//! # Store Error Types
//!
//! Errors returned by the menu store, its storage adapter and its
//! configuration loader.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  CoreError (menu-core)        io / serde_json / toml errors            │
//! │  Validation, Duplicate,            │                                    │
//! │  NotFound, Format                  │                                    │
//! │       │                            │                                    │
//! │       ▼                            ▼                                    │
//! │  StoreError (this module) ← Core(..) | Storage | Serialization | Config │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Presentation layer shows the message and keeps the form open          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is recoverable: a failed command leaves the tables exactly as
//! they were.

use menu_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A domain rule rejected the command.
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// The blob store could not read, write or delete.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The snapshot could not be encoded or decoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid store configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Creates a Storage error.
    pub fn storage(reason: impl Into<String>) -> Self {
        StoreError::Storage(reason.into())
    }

    /// Creates a Config error.
    pub fn config(reason: impl Into<String>) -> Self {
        StoreError::Config(reason.into())
    }

    /// Returns true if the command was rejected by a domain rule rather than
    /// by the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, StoreError::Core(_))
    }

    /// Returns true if this error came from persisting or loading state.
    pub fn is_persistence_error(&self) -> bool {
        matches!(self, StoreError::Storage(_) | StoreError::Serialization(_))
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_pass_through() {
        let err: StoreError = CoreError::not_found("Category", 7).into();
        assert_eq!(err.to_string(), "Category not found: 7");
        assert!(err.is_user_error());
        assert!(!err.is_persistence_error());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: StoreError = ValidationError::EmptyOptions.into();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::Validation(ValidationError::EmptyOptions))
        ));
    }

    #[test]
    fn test_io_and_json_categorization() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(StoreError::from(io).is_persistence_error());

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(StoreError::from(json), StoreError::Serialization(_)));
    }
}
