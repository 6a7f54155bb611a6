//! # dd-character
//!
//! Dynamically displayable characters for visual novel engines.
//!
//! A character's image is not fixed. It carries attributes ("mood",
//! "pose", "energy") in a shared store, and an ordered list of rules maps
//! those attributes to the image tag the host engine should show.
//!
//! ## Design Principles
//!
//! 1. **One evaluation shape**: Rules are AND-chains of comparators. The
//!    first rule that fully matches wins; otherwise a default image, and
//!    failing that a placeholder naming the character.
//!
//! 2. **Explicit shared state**: Attributes live in an [`AttributeStore`]
//!    handle passed to every character. No ambient globals.
//!
//! 3. **Host-agnostic**: Rendering is the host's job. Characters only
//!    rewrite image names before calling [`DisplayHost`].
//!
//! ## Modules
//!
//! - `attributes`: Values, spec-string parsing, the shared store
//! - `comparators`: Attribute predicates
//! - `rules`: Rules and the resolution engine
//! - `character`: Configuration, the character facade, host boundary
//! - `error`: Error types
//! - `python`: PyO3 bindings (feature `python`)

pub mod attributes;
pub mod character;
pub mod comparators;
pub mod error;
pub mod rules;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::attributes::{
    parse_attribute_spec, AttributeMap, AttributeStore, AttributeValue, CharacterSnapshot,
    ValueKind,
};

pub use crate::comparators::{AttributeSource, Comparator};

pub use crate::rules::{ResolutionEngine, Rule, RuleSpec};

pub use crate::character::{
    CharacterConfig, CharacterKind, DDCharacter, DisplayHost, ImageName, ShowParams,
};

pub use crate::error::{CharacterError, EvalError, Result, RuleError};
