//! Comparators: predicates over a character's attributes.
//!
//! Comparators read attributes through the [`AttributeSource`] capability.
//! Anything that can name itself and look up its attributes can be tested:
//! a [`DDCharacter`](crate::character::DDCharacter) or a
//! [`CharacterSnapshot`](crate::attributes::CharacterSnapshot).
//!
//! ## Example Usage
//!
//! ```
//! use dd_character::attributes::AttributeStore;
//! use dd_character::comparators::Comparator;
//!
//! let store = AttributeStore::new();
//! store.set("Eileen", "energy", 3i64);
//! let snapshot = store.snapshot("Eileen");
//!
//! assert!(Comparator::range("energy", 1i64, 5i64).eval(&snapshot).unwrap());
//! assert!(!Comparator::equals("mood", "happy").eval(&snapshot).unwrap());
//!
//! let parsed: Comparator = "energy>2".parse().unwrap();
//! assert!(parsed.eval(&snapshot).unwrap());
//! ```

mod comparator;

pub use comparator::Comparator;

pub(crate) use comparator::find_unquoted;

use crate::attributes::AttributeValue;

/// Read access to one character's attributes.
pub trait AttributeSource {
    /// Name of the character the attributes belong to.
    fn source_name(&self) -> &str;

    /// Check if an attribute is set (even to `Null`).
    fn contains_attribute(&self, attribute: &str) -> bool;

    /// Current value of an attribute, `None` if unset.
    fn attribute(&self, attribute: &str) -> Option<AttributeValue>;
}
