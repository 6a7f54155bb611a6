//! Character configuration.
//!
//! Characters are configured at definition time by providing:
//! - `CharacterConfig`: Name, initial attributes, rules, default image
//! - `CharacterKind`: A prototype whose rules and image fill in whatever
//!   the config leaves out
//!
//! Both are plain data and deserialize from any serde format.

use serde::{Deserialize, Serialize};

use crate::rules::RuleSpec;

/// Definition-time configuration of a single character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Character name. Also the key into the attribute store.
    pub name: String,

    /// Initial attributes, e.g. `"mood=happy energy=3 blushing"`.
    pub attributes: Option<String>,

    /// Rules in priority order. Empty inherits the kind's rules.
    #[serde(alias = "img_tag_map")]
    pub image_tag_map: Vec<RuleSpec>,

    /// Image used when no rule matches.
    pub image: Option<String>,
}

impl CharacterConfig {
    /// Create a configuration with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the initial attribute spec.
    #[must_use]
    pub fn with_attributes(mut self, spec: impl Into<String>) -> Self {
        self.attributes = Some(spec.into());
        self
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.image_tag_map.push(rule.into());
        self
    }

    /// Append several rules, keeping their order.
    #[must_use]
    pub fn with_rules<R: Into<RuleSpec>>(mut self, rules: impl IntoIterator<Item = R>) -> Self {
        self.image_tag_map.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Set the default image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// A character prototype.
///
/// Characters built from a kind inherit its rules when they configure none,
/// and its image when they set none. Attributes are never inherited; they
/// live in the shared store under each character's own name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterKind {
    /// Human-readable name (for debugging).
    pub name: String,

    /// Rules handed down to characters without their own.
    #[serde(alias = "img_tag_map")]
    pub image_tag_map: Vec<RuleSpec>,

    /// Image handed down to characters without their own.
    pub image: Option<String>,
}

impl Default for CharacterKind {
    fn default() -> Self {
        Self::base()
    }
}

impl CharacterKind {
    /// Create an empty kind.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_tag_map: Vec::new(),
            image: None,
        }
    }

    /// The default kind: no rules, no image.
    #[must_use]
    pub fn base() -> Self {
        Self::new("dd")
    }

    /// Append a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.image_tag_map.push(rule.into());
        self
    }

    /// Set the image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Rules and image for a character, preferring the config's own.
    pub(crate) fn fill(&self, config: &CharacterConfig) -> (Vec<RuleSpec>, Option<String>) {
        let rules = if config.image_tag_map.is_empty() {
            self.image_tag_map.clone()
        } else {
            config.image_tag_map.clone()
        };
        let image = config.image.clone().or_else(|| self.image.clone());
        (rules, image)
    }
}
