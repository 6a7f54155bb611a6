//! Dynamically displayable characters.
//!
//! A `DDCharacter` is the engine-facing side of the crate. It exposes the
//! character's attributes as a map, keeps the resolved image tag cached,
//! and swaps that tag in for the character's identity whenever the host is
//! asked to show or hide it.

use crate::attributes::{parse_attribute_spec, AttributeStore, AttributeValue, CharacterSnapshot};
use crate::comparators::AttributeSource;
use crate::error::{CharacterError, Result};
use crate::rules::{ResolutionEngine, Rule, RuleSpec};

use super::config::{CharacterConfig, CharacterKind};
use super::host::{DisplayHost, ImageName, ShowParams};

/// A character whose image is picked by rules over its attributes.
///
/// Attributes live in the shared [`AttributeStore`] under the character's
/// name, so two characters with the same name share them.
///
/// The resolved tag is recomputed right after every write that changes an
/// attribute through this character. Writes made through another handle on
/// the same store are picked up the next time the tag is used.
#[derive(Debug)]
pub struct DDCharacter {
    name: String,
    store: AttributeStore,
    engine: ResolutionEngine,

    /// Last resolved tag.
    tag: String,
    /// Store revision `tag` was resolved at.
    tag_revision: u64,
    /// Rules or default changed since `tag` was resolved.
    stale: bool,

    recomputes: u64,
}

impl DDCharacter {
    /// Create a character from the base kind.
    pub fn new(config: CharacterConfig, store: AttributeStore) -> Result<Self> {
        Self::with_kind(config, &CharacterKind::base(), store)
    }

    /// Create a character, inheriting rules and image from `kind`.
    ///
    /// Everything is validated, and the rules are resolved once against the
    /// initial attributes, before the first attribute is written.
    pub fn with_kind(
        config: CharacterConfig,
        kind: &CharacterKind,
        store: AttributeStore,
    ) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(CharacterError::EmptyName);
        }

        let initial = match &config.attributes {
            Some(spec) => parse_attribute_spec(spec)?,
            None => Vec::new(),
        };

        let (specs, image) = kind.fill(&config);
        let rules = specs
            .into_iter()
            .map(RuleSpec::into_rule)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut engine = ResolutionEngine::new();
        engine.set_default_image(image);
        engine.register_all(rules);

        // A type error here leaves the store as it was
        let preview = store
            .snapshot(&config.name)
            .with_writes(initial.iter().cloned());
        engine.resolve(&preview)?;

        for (attribute, value) in initial {
            store.set(&config.name, attribute, value);
        }

        let mut character = Self {
            name: config.name,
            store,
            engine,
            tag: String::new(),
            tag_revision: 0,
            stale: true,
            recomputes: 0,
        };
        character.recompute()?;

        log::debug!(
            "created character {} (kind {}, {} rules) showing {:?}",
            character.name,
            kind.name,
            character.engine.len(),
            character.tag
        );
        Ok(character)
    }

    /// The character's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The shared store this character reads from.
    #[must_use]
    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    /// The character's rules and fallback.
    #[must_use]
    pub fn engine(&self) -> &ResolutionEngine {
        &self.engine
    }

    // === Map-like attribute access ===

    /// Set an attribute. Returns whether anything changed.
    ///
    /// Setting an attribute to its current value changes nothing and does
    /// not recompute the tag.
    pub fn set(
        &mut self,
        attribute: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Result<bool> {
        let changed = self.store.set(&self.name, attribute, value);
        if changed {
            self.recompute()?;
        }
        Ok(changed)
    }

    /// Get an attribute, `None` if unset.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<AttributeValue> {
        self.store.get(&self.name, attribute)
    }

    /// Check if an attribute is set.
    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.store.contains(&self.name, attribute)
    }

    /// Remove an attribute. A missing attribute is a no-op.
    pub fn delete(&mut self, attribute: &str) -> Result<Option<AttributeValue>> {
        let removed = self.store.delete(&self.name, attribute);
        if removed.is_some() {
            self.recompute()?;
        }
        Ok(removed)
    }

    /// Number of attributes set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.count(&self.name)
    }

    /// Check if no attributes are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consistent copy of the current attributes.
    #[must_use]
    pub fn attributes(&self) -> CharacterSnapshot {
        self.store.snapshot(&self.name)
    }

    // === Rules ===

    /// Append a rule at the lowest priority.
    pub fn register_rule(&mut self, rule: Rule) -> Result<()> {
        self.engine.register(rule);
        self.stale = true;
        self.recompute()
    }

    /// Append several rules, keeping their order.
    pub fn register_rules(&mut self, rules: impl IntoIterator<Item = Rule>) -> Result<()> {
        self.engine.register_all(rules);
        self.stale = true;
        self.recompute()
    }

    /// Validate and append a configured rule.
    pub fn register_spec(&mut self, spec: impl Into<RuleSpec>) -> Result<()> {
        self.engine.register_spec(spec)?;
        self.stale = true;
        self.recompute()
    }

    /// Replace the default image.
    pub fn set_default_image(&mut self, image: Option<String>) -> Result<()> {
        self.engine.set_default_image(image);
        self.stale = true;
        self.recompute()
    }

    // === Resolution ===

    /// The current image tag, recomputed first if attributes changed
    /// through another handle.
    pub fn image_tag(&mut self) -> Result<&str> {
        if self.stale || self.tag_revision != self.store.revision(&self.name) {
            self.recompute()?;
        }
        Ok(&self.tag)
    }

    /// The last resolved tag, without checking the store.
    #[must_use]
    pub fn cached_tag(&self) -> &str {
        &self.tag
    }

    /// How many times the tag has been recomputed.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    fn recompute(&mut self) -> Result<()> {
        let snapshot = self.store.snapshot(&self.name);
        let tag = self.engine.resolve(&snapshot)?;

        if tag != self.tag {
            log::debug!("{}: image tag {:?} -> {:?}", self.name, self.tag, tag);
        }

        self.tag = tag;
        self.tag_revision = snapshot.revision();
        self.stale = false;
        self.recomputes += 1;
        Ok(())
    }

    // === Host display ===

    /// Rewrite an image name so its identity is the resolved tag.
    ///
    /// `eileen left` with tag `eileen happy` becomes `eileen happy left`.
    pub fn display_name(&mut self, name: &ImageName) -> Result<ImageName> {
        let tag = self.image_tag()?;
        Ok(name.with_identity(tag))
    }

    /// Show the character through the host, under its resolved tag.
    pub fn show<H: DisplayHost + ?Sized>(
        &mut self,
        host: &mut H,
        name: &ImageName,
        params: &ShowParams,
    ) -> Result<()> {
        let name = self.display_name(name)?;
        log::debug!("{}: show {}", self.name, name);
        host.show(&name, params);
        Ok(())
    }

    /// Hide the character through the host, under its resolved tag.
    pub fn hide<H: DisplayHost + ?Sized>(
        &mut self,
        host: &mut H,
        name: &ImageName,
        layer: Option<&str>,
    ) -> Result<()> {
        let name = self.display_name(name)?;
        log::debug!("{}: hide {}", self.name, name);
        host.hide(&name, layer);
        Ok(())
    }
}

impl AttributeSource for DDCharacter {
    fn source_name(&self) -> &str {
        &self.name
    }

    fn contains_attribute(&self, attribute: &str) -> bool {
        self.contains(attribute)
    }

    fn attribute(&self, attribute: &str) -> Option<AttributeValue> {
        self.get(attribute)
    }
}
