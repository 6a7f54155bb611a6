//! Characters: configuration, the attribute facade, and the host boundary.
//!
//! ## Key Types
//!
//! - `CharacterConfig`: Definition-time settings for one character
//! - `CharacterKind`: Prototype supplying inherited rules and image
//! - `DDCharacter`: Map-like attribute access plus tag-rewriting show/hide
//! - `DisplayHost`: The host engine's show/hide primitives
//!
//! ## Example Usage
//!
//! ```
//! use dd_character::attributes::AttributeStore;
//! use dd_character::character::{CharacterConfig, DDCharacter};
//!
//! let store = AttributeStore::new();
//! let config = CharacterConfig::new("Eileen")
//!     .with_attributes("pose=standing mood=happy")
//!     .with_rule("pose==sitting, mood==sad, eileen_sad_sit")
//!     .with_rule("mood==happy, eileen_happy")
//!     .with_image("eileen");
//!
//! let mut eileen = DDCharacter::new(config, store.clone()).unwrap();
//! assert_eq!(eileen.image_tag().unwrap(), "eileen_happy");
//!
//! eileen.set("mood", "neutral").unwrap();
//! assert_eq!(eileen.image_tag().unwrap(), "eileen");
//! ```

mod config;
mod facade;
mod host;

pub use config::{CharacterConfig, CharacterKind};
pub use facade::DDCharacter;
pub use host::{DisplayHost, ImageName, ImageTokens, ShowParams};
