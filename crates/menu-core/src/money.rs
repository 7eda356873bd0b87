//! # Money Module
//!
//! Provides the `Money` type for prices and option surcharges.
//!
//! ## Integer Inside, Decimal Outside
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  JSON documents (export, import, persisted snapshot):                  │
//! │    "price": 2.5          "value": 0.125                                │
//! │         │                      │                                        │
//! │         ▼                      ▼                                        │
//! │  Money(2_500_000)        Money(125_000)  ← millionths, exact compare   │
//! │         │                      │                                        │
//! │         ▼                      ▼                                        │
//! │    "price": 2.5          "value": 0.125  ← written back unchanged      │
//! │                                                                         │
//! │  Up to six fractional digits survive a round trip. Finer digits are    │
//! │  rounded half away from zero when they enter the system.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use menu_core::money::Money;
//!
//! let price = Money::from_decimal(3.0).unwrap();
//! assert_eq!(price, Money::from_cents(300));
//!
//! // NaN and infinities never become money
//! assert!(Money::from_decimal(f64::NAN).is_none());
//! ```

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Stored units per major currency unit.
const UNITS_PER_MAJOR: i64 = 1_000_000;

/// Stored units per cent.
const UNITS_PER_CENT: i64 = UNITS_PER_MAJOR / 100;

/// Largest magnitude accepted by [`Money::from_decimal`], in major units.
const MAX_DECIMAL: f64 = (i64::MAX / UNITS_PER_MAJOR) as f64;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in millionths of the major currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: the model only stores non-negative prices, but the
///   import path is permissive and must be able to hold what it is given
/// - **Millionths, not cents**: imported documents may carry sub-cent
///   amounts such as `0.125`, and these are kept as written
/// - **Serialized as a decimal number**: the interchange documents carry
///   `2.5`, never `2500000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole cents.
    ///
    /// ## Example
    /// ```rust
    /// use menu_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents * UNITS_PER_CENT)
    }

    /// Creates a Money value from millionths of a major unit.
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Money(micros)
    }

    /// Creates a Money value from a decimal amount in major units.
    ///
    /// Returns `None` for NaN, infinities and magnitudes that do not fit.
    ///
    /// ## Example
    /// ```rust
    /// use menu_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(2.5).unwrap(), Money::from_cents(250));
    /// assert_eq!(Money::from_decimal(0.125).unwrap().micros(), 125_000);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount.abs() > MAX_DECIMAL {
            return None;
        }
        Some(Money((amount * UNITS_PER_MAJOR as f64).round() as i64))
    }

    /// Returns the value in millionths of a major unit.
    #[inline]
    pub const fn micros(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount in major units.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / UNITS_PER_MAJOR as f64
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal rendering with at least two fractional digits. Sub-cent
/// digits are shown only when present.
///
/// Currency symbols are a presentation concern and are not added here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let whole = (self.0 / UNITS_PER_MAJOR).abs();
        let fraction = format!("{:06}", (self.0 % UNITS_PER_MAJOR).abs());
        let fraction = fraction.trim_end_matches('0');
        write!(f, "{}{}.{:0<2}", sign, whole, fraction)
    }
}

/// Whole amounts are written as integers (`3`), others as decimals (`2.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % UNITS_PER_MAJOR == 0 {
            serializer.serialize_i64(self.0 / UNITS_PER_MAJOR)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(UNITS_PER_MAJOR)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount {} out of range", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .map_err(|_| E::custom(format!("amount {} out of range", v)))
            .and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_decimal(v).ok_or_else(|| E::custom(format!("amount {} out of range", v)))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal() {
        assert_eq!(Money::from_decimal(2.5).unwrap(), Money::from_cents(250));
        assert_eq!(Money::from_decimal(0.0).unwrap(), Money::zero());
        assert_eq!(Money::from_decimal(-0.5).unwrap(), Money::from_cents(-50));
        assert_eq!(Money::from_decimal(0.005).unwrap().micros(), 5_000);
        assert_eq!(Money::from_decimal(1.0000004).unwrap().micros(), 1_000_000);
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(f64::INFINITY).is_none());
        assert!(Money::from_decimal(f64::MAX).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::from_micros(125_000).to_string(), "0.125");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_serializes_as_decimal() {
        assert_eq!(serde_json::to_string(&Money::from_cents(250)).unwrap(), "2.5");
        assert_eq!(serde_json::to_string(&Money::from_cents(300)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Money::from_micros(5_000)).unwrap(), "0.005");
        assert_eq!(serde_json::to_string(&Money::zero()).unwrap(), "0");
    }

    #[test]
    fn test_deserializes_integers_and_decimals() {
        let whole: Money = serde_json::from_str("3").unwrap();
        assert_eq!(whole, Money::from_cents(300));

        let decimal: Money = serde_json::from_str("0.75").unwrap();
        assert_eq!(decimal, Money::from_cents(75));

        let sub_cent: Money = serde_json::from_str("0.125").unwrap();
        assert_eq!(sub_cent.micros(), 125_000);

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_micros(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
