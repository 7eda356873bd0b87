//! # Validation Module
//!
//! Field-level rules for menu input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (web form)                                      │
//! │  └── Immediate user feedback, parses text fields into numbers          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - single field rules                             │
//! │  ├── names and labels non-empty after trim                             │
//! │  ├── prices finite and non-negative                                    │
//! │  └── modifier min <= max                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: input module - rules that need the tables                    │
//! │  ├── parent references exist                                           │
//! │  └── case-insensitive name uniqueness                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use menu_core::validation::{validate_name, validate_price};
//!
//! assert_eq!(validate_name("name", "  Drinks ").unwrap(), "Drinks");
//! assert!(validate_name("name", "   ").is_err());
//!
//! assert_eq!(validate_price(2.5).unwrap().to_string(), "2.50");
//! assert!(validate_price(-1.0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required text field and returns it trimmed.
pub fn validate_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(value.to_string())
}

/// Normalizes an optional image URL. Blank input means "no image".
pub fn normalize_image(image: Option<&str>) -> String {
    image.map(str::trim).unwrap_or_default().to_string()
}

/// Case-insensitive name comparison used by every uniqueness rule.
///
/// ## Example
/// ```rust
/// use menu_core::validation::names_match;
///
/// assert!(names_match("Drinks", "DRINKS"));
/// assert!(!names_match("Drinks", "Drink"));
/// ```
pub fn names_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price given in major units.
///
/// ## Rules
/// - Must be a finite number
/// - Must be non-negative (zero is allowed for free items)
///
/// The sign is checked before conversion, so a tiny negative amount is
/// rejected rather than rounded to zero.
pub fn validate_price(price: f64) -> ValidationResult<Money> {
    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Money::from_decimal(price).ok_or_else(|| ValidationError::InvalidNumber {
        field: "price".to_string(),
    })
}

/// Converts an option surcharge, treating anything that is not a usable
/// number as zero.
pub fn option_value(value: f64) -> Money {
    Money::from_decimal(value).unwrap_or_default()
}

/// Validates modifier selection bounds.
///
/// ## Rules
/// - `min` must not exceed `max`
pub fn validate_modifier_bounds(min: u32, max: u32) -> ValidationResult<()> {
    if min > max {
        return Err(ValidationError::InvalidRange {
            field: "modifier".to_string(),
            min,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("name", "Cola").unwrap(), "Cola");
        assert_eq!(validate_name("name", "  Cola  ").unwrap(), "Cola");
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", " \t ").is_err());
    }

    #[test]
    fn test_names_match_ignores_case_and_padding() {
        assert!(names_match("Cola", "cola"));
        assert!(names_match(" Cola", "COLA "));
        assert!(!names_match("Cola", "Colas"));
    }

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), Money::zero());
        assert_eq!(validate_price(10.99).unwrap(), Money::from_cents(1099));
        assert!(matches!(
            validate_price(-0.01),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            validate_price(-0.004),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            validate_price(f64::NEG_INFINITY),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert_eq!(validate_price(0.125).unwrap().micros(), 125_000);
        assert!(matches!(
            validate_price(f64::NAN),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_option_value_defaults_to_zero() {
        assert_eq!(option_value(1.25), Money::from_cents(125));
        assert_eq!(option_value(f64::NAN), Money::zero());
        assert_eq!(option_value(f64::INFINITY), Money::zero());
    }

    #[test]
    fn test_validate_modifier_bounds() {
        assert!(validate_modifier_bounds(0, 1).is_ok());
        assert!(validate_modifier_bounds(2, 2).is_ok());
        assert!(validate_modifier_bounds(3, 1).is_err());
    }

    #[test]
    fn test_normalize_image() {
        assert_eq!(normalize_image(None), "");
        assert_eq!(normalize_image(Some("  ")), "");
        assert_eq!(normalize_image(Some(" https://x/y.png ")), "https://x/y.png");
    }
}
