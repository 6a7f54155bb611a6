//! Shared per-character attribute storage.
//!
//! The `AttributeStore` maps a character name to that character's
//! attributes. Every character sharing a name sees the same map, and every
//! clone of the store handle sees the same data for the whole session.
//!
//! ## Change Tracking
//!
//! Each character entry carries a revision counter that only moves on an
//! actual change. Writing a value equal to the stored one is a no-op, so
//! nothing downstream recomputes.
//!
//! ## Consistency
//!
//! One lock guards the whole store. Resolution reads through
//! [`AttributeStore::snapshot`], which copies a character's map under a
//! single read lock (O(1) thanks to `im`), so a resolution never sees half
//! of a concurrent write.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::comparators::AttributeSource;

use super::value::AttributeValue;

/// Attributes of a single character.
pub type AttributeMap = im::HashMap<String, AttributeValue>;

#[derive(Clone, Debug, Default)]
struct CharacterEntry {
    attributes: AttributeMap,
    revision: u64,
}

/// Handle to the shared attribute store.
///
/// Cloning the handle is cheap and shares the underlying data.
///
/// ## Example
///
/// ```
/// use dd_character::attributes::{AttributeStore, AttributeValue};
///
/// let store = AttributeStore::new();
/// assert!(store.set("Eileen", "mood", "happy"));
///
/// // Same value again: nothing changes
/// assert!(!store.set("Eileen", "mood", "happy"));
///
/// let shared = store.clone();
/// assert_eq!(shared.get("Eileen", "mood"), Some(AttributeValue::from("happy")));
/// assert_eq!(shared.count("Lucy"), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttributeStore {
    inner: Arc<RwLock<FxHashMap<String, CharacterEntry>>>,
}

impl AttributeStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, creating the character's map on first write.
    ///
    /// Returns `true` if the stored state changed, `false` if the value
    /// was equal to the one already stored.
    pub fn set(
        &self,
        character: &str,
        attribute: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> bool {
        let attribute = attribute.into();
        let value = value.into();

        let mut characters = self.inner.write();
        let entry = characters.entry(character.to_string()).or_default();

        if entry.attributes.get(&attribute) == Some(&value) {
            return false;
        }

        entry.attributes.insert(attribute, value);
        entry.revision += 1;
        true
    }

    /// Get an attribute value. `None` if the character or attribute is unknown.
    #[must_use]
    pub fn get(&self, character: &str, attribute: &str) -> Option<AttributeValue> {
        self.inner
            .read()
            .get(character)
            .and_then(|entry| entry.attributes.get(attribute).cloned())
    }

    /// Check if a character has an attribute set (even to `Null`).
    #[must_use]
    pub fn contains(&self, character: &str, attribute: &str) -> bool {
        self.inner
            .read()
            .get(character)
            .is_some_and(|entry| entry.attributes.contains_key(attribute))
    }

    /// Remove an attribute. Returns the removed value, or `None` (and does
    /// nothing) if it wasn't set.
    pub fn delete(&self, character: &str, attribute: &str) -> Option<AttributeValue> {
        let mut characters = self.inner.write();
        let entry = characters.get_mut(character)?;
        let removed = entry.attributes.remove(attribute)?;
        entry.revision += 1;
        Some(removed)
    }

    /// Number of attributes set for a character, 0 if unknown.
    #[must_use]
    pub fn count(&self, character: &str) -> usize {
        self.inner
            .read()
            .get(character)
            .map_or(0, |entry| entry.attributes.len())
    }

    /// Change counter for a character, 0 if unknown.
    ///
    /// Only moves when `set`, `delete` or `clear` actually change something.
    #[must_use]
    pub fn revision(&self, character: &str) -> u64 {
        self.inner
            .read()
            .get(character)
            .map_or(0, |entry| entry.revision)
    }

    /// Consistent copy of a character's attributes.
    #[must_use]
    pub fn snapshot(&self, character: &str) -> CharacterSnapshot {
        let characters = self.inner.read();
        let (attributes, revision) = characters
            .get(character)
            .map(|entry| (entry.attributes.clone(), entry.revision))
            .unwrap_or_default();

        CharacterSnapshot {
            name: character.to_string(),
            attributes,
            revision,
        }
    }

    /// Remove every attribute of a character. Returns how many were removed.
    pub fn clear(&self, character: &str) -> usize {
        let mut characters = self.inner.write();
        let Some(entry) = characters.get_mut(character) else {
            return 0;
        };

        let removed = entry.attributes.len();
        if removed > 0 {
            entry.attributes.clear();
            entry.revision += 1;
        }
        removed
    }

    /// Names of all characters that have a map, sorted.
    #[must_use]
    pub fn characters(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.read().keys().cloned().collect();
        names.sort();
        names
    }
}

/// A point-in-time copy of one character's attributes.
#[derive(Clone, Debug)]
pub struct CharacterSnapshot {
    name: String,
    attributes: AttributeMap,
    revision: u64,
}

impl CharacterSnapshot {
    /// Name of the character this snapshot belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store revision the snapshot was taken at.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The captured attributes.
    #[must_use]
    pub fn attributes(&self) -> &AttributeMap {
        &self.attributes
    }

    /// This snapshot with `writes` applied on top. The store is untouched.
    #[must_use]
    pub fn with_writes<I>(mut self, writes: I) -> Self
    where
        I: IntoIterator<Item = (String, AttributeValue)>,
    {
        self.attributes.extend(writes);
        self
    }
}

impl AttributeSource for CharacterSnapshot {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn contains_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains_key(attribute)
    }

    fn attribute(&self, attribute: &str) -> Option<AttributeValue> {
        self.attributes.get(attribute).cloned()
    }
}
