//! # Identifiers
//!
//! Typed ids for the four menu entities and the generator that issues them.
//!
//! Every id is an opaque integer on the wire. The typed wrappers only exist
//! so a `ProductId` can never be passed where a `CategoryId` is expected.
//!
//! ## Id Generation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  next = max(clock_millis, last + 1)                                    │
//! │                                                                         │
//! │  • Clock-seeded: ids stay roughly time ordered across restarts         │
//! │  • Strictly increasing: two records in the same millisecond still      │
//! │    get distinct ids                                                    │
//! │  • observe(id): loaded or imported ids push `last` forward, so fresh   │
//! │    ids never collide with authoritative external ones                  │
//! │  • Once `last` is i64::MAX no further id can be issued                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw id.
            #[inline]
            pub const fn new(raw: i64) -> Self {
                $name(raw)
            }

            /// Returns the raw integer id.
            #[inline]
            pub const fn get(&self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                $name(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Id of a [`Category`](crate::types::Category).
    CategoryId
);
entity_id!(
    /// Id of a [`Product`](crate::types::Product).
    ProductId
);
entity_id!(
    /// Id of a [`Modifier`](crate::types::Modifier).
    ModifierId
);
entity_id!(
    /// Id of a [`ModifierOption`](crate::types::ModifierOption), unique within
    /// its modifier.
    OptionId
);

// =============================================================================
// Id Generator
// =============================================================================

/// Monotonic, clock-seeded id source.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Creates a generator whose next id is at least the current time in
    /// milliseconds.
    pub fn new() -> Self {
        IdGenerator { last: 0 }
    }

    /// Creates a generator that will only issue ids greater than `last`.
    ///
    /// ## Example
    /// ```rust
    /// use menu_core::ids::{CategoryId, IdGenerator};
    ///
    /// let mut ids = IdGenerator::starting_after(i64::MAX - 2);
    /// let a: CategoryId = ids.next_id().unwrap();
    /// let b: CategoryId = ids.next_id().unwrap();
    /// assert!(b > a);
    ///
    /// // The id space is spent
    /// assert!(ids.next_id::<CategoryId>().is_err());
    /// ```
    pub fn starting_after(last: i64) -> Self {
        IdGenerator { last }
    }

    /// Issues the next id.
    ///
    /// Fails with [`CoreError::IdsExhausted`] once `i64::MAX` has been issued
    /// or observed. The generator is left unchanged in that case.
    pub fn next_raw(&mut self) -> CoreResult<i64> {
        let successor = self.last.checked_add(1).ok_or(CoreError::IdsExhausted)?;
        self.last = Utc::now().timestamp_millis().max(successor);
        Ok(self.last)
    }

    /// Issues the next id as a typed id.
    pub fn next_id<T: From<i64>>(&mut self) -> CoreResult<T> {
        self.next_raw().map(T::from)
    }

    /// Records an id that came from outside (load, import) so it is never
    /// issued again.
    pub fn observe(&mut self, raw: i64) {
        if raw > self.last {
            self.last = raw;
        }
    }

    /// The most recently issued or observed id.
    pub fn last(&self) -> i64 {
        self.last
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let mut previous = ids.next_raw().unwrap();
        for _ in 0..1_000 {
            let next = ids.next_raw().unwrap();
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_ids_are_clock_seeded() {
        let before = Utc::now().timestamp_millis();
        let mut ids = IdGenerator::new();
        assert!(ids.next_raw().unwrap() >= before);
    }

    #[test]
    fn test_observe_advances_past_external_ids() {
        let mut ids = IdGenerator::new();
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        ids.observe(far_future);
        assert_eq!(ids.next_raw().unwrap(), far_future + 1);

        // Observing a smaller id never moves backwards
        ids.observe(5);
        assert!(ids.next_raw().unwrap() > far_future + 1);
    }

    #[test]
    fn test_exhausted_generator_never_repeats() {
        let mut ids = IdGenerator::new();
        ids.observe(i64::MAX);

        assert!(matches!(ids.next_raw(), Err(CoreError::IdsExhausted)));
        assert!(matches!(ids.next_id::<ProductId>(), Err(CoreError::IdsExhausted)));
        assert_eq!(ids.last(), i64::MAX);

        let mut ids = IdGenerator::starting_after(i64::MAX - 1);
        assert_eq!(ids.next_raw().unwrap(), i64::MAX);
        assert!(ids.next_raw().is_err());
    }

    #[test]
    fn test_typed_ids_serialize_as_integers() {
        let id = ProductId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: ProductId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
        assert_eq!(id.to_string(), "42");
    }
}
