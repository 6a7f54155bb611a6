//! Character integration tests.
//!
//! These tests verify the character facade end to end: configuration,
//! shared attributes, tag caching, and the host show/hide boundary.

use dd_character::attributes::{AttributeStore, AttributeValue};
use dd_character::character::{
    CharacterConfig, CharacterKind, DDCharacter, DisplayHost, ImageName, ShowParams,
};
use dd_character::comparators::Comparator;
use dd_character::error::CharacterError;
use dd_character::rules::Rule;

/// Host that records every call.
#[derive(Default)]
struct RecordingHost {
    calls: Vec<String>,
}

impl DisplayHost for RecordingHost {
    fn show(&mut self, name: &ImageName, params: &ShowParams) {
        self.calls.push(format!(
            "show {} at={:?} layer={:?}",
            name, params.at_list, params.layer
        ));
    }

    fn hide(&mut self, name: &ImageName, layer: Option<&str>) {
        self.calls.push(format!("hide {} layer={:?}", name, layer));
    }
}

fn eileen_config() -> CharacterConfig {
    CharacterConfig::new("Eileen")
        .with_attributes("pose=standing mood=happy")
        .with_rules([
            "pose==sitting, mood==sad, eileen_sad_sit",
            "mood==happy, eileen_happy",
        ])
        .with_image("eileen")
}

// =============================================================================
// End-to-End
// =============================================================================

/// The Eileen walkthrough: happy resolves to its rule, neutral to the default.
#[test]
fn test_eileen_scenario() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(eileen_config(), store.clone()).unwrap();

    assert_eq!(eileen.image_tag().unwrap(), "eileen_happy");

    store.set("Eileen", "mood", "neutral");
    assert_eq!(eileen.image_tag().unwrap(), "eileen");

    eileen.set("pose", "sitting").unwrap();
    eileen.set("mood", "sad").unwrap();
    assert_eq!(eileen.image_tag().unwrap(), "eileen_sad_sit");
}

/// Attribute spec strings seed the shared map.
#[test]
fn test_attribute_spec_seeds_store() {
    let store = AttributeStore::new();
    let character = DDCharacter::new(
        CharacterConfig::new("Lucy").with_attributes("mood=happy energy=3 flag"),
        store.clone(),
    )
    .unwrap();

    assert_eq!(character.len(), 3);
    assert_eq!(store.get("Lucy", "mood"), Some(AttributeValue::from("happy")));
    assert_eq!(store.get("Lucy", "energy"), Some(AttributeValue::Int(3)));
    assert_eq!(store.get("Lucy", "flag"), Some(AttributeValue::Null));
    assert!(character.contains("flag"));
}

/// Setting an attribute to its current value is indistinguishable from a no-op.
#[test]
fn test_equal_write_is_silent() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(eileen_config(), store.clone()).unwrap();
    let recomputes = eileen.recompute_count();
    let revision = store.revision("Eileen");

    assert!(!eileen.set("mood", "happy").unwrap());
    assert!(!eileen.set("pose", "standing").unwrap());

    assert_eq!(eileen.recompute_count(), recomputes);
    assert_eq!(store.revision("Eileen"), revision);
}

// =============================================================================
// Shared Store
// =============================================================================

/// Two characters with the same name share attributes.
#[test]
fn test_same_name_shares_attributes() {
    let store = AttributeStore::new();
    let mut formal = DDCharacter::new(eileen_config(), store.clone()).unwrap();
    let mut casual = DDCharacter::new(
        CharacterConfig::new("Eileen").with_rule("mood==happy, eileen_casual"),
        store.clone(),
    )
    .unwrap();

    casual.set("mood", "sad").unwrap();
    assert_eq!(formal.get("mood"), Some("sad".into()));
    assert_eq!(formal.image_tag().unwrap(), "eileen");

    formal.set("mood", "happy").unwrap();
    assert_eq!(casual.image_tag().unwrap(), "eileen_casual");
}

/// Re-creating a character with the same spec doesn't disturb the store.
#[test]
fn test_recreate_keeps_existing_values() {
    let store = AttributeStore::new();
    let mut first = DDCharacter::new(eileen_config(), store.clone()).unwrap();
    first.set("hat", "on").unwrap();
    let revision = store.revision("Eileen");

    let second = DDCharacter::new(eileen_config(), store.clone()).unwrap();
    assert_eq!(store.revision("Eileen"), revision);
    assert_eq!(second.get("hat"), Some("on".into()));
}

/// Different names never see each other's attributes.
#[test]
fn test_names_are_isolated() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(eileen_config(), store.clone()).unwrap();
    let lucy = DDCharacter::new(CharacterConfig::new("Lucy"), store.clone()).unwrap();

    eileen.set("energy", 5i64).unwrap();
    assert!(!lucy.contains("energy"));
    assert_eq!(lucy.len(), 0);
    assert_eq!(store.characters(), vec!["Eileen".to_string()]);
}

// =============================================================================
// Kinds
// =============================================================================

/// A kind's rules and image apply when the character sets none.
#[test]
fn test_kind_inheritance() {
    let store = AttributeStore::new();
    let kind = CharacterKind::new("moody")
        .with_rule(Rule::when(Comparator::equals("mood", "happy"), "grin").unwrap())
        .with_image("plain");

    let mut inherits = DDCharacter::with_kind(
        CharacterConfig::new("Lucy").with_attributes("mood=happy"),
        &kind,
        store.clone(),
    )
    .unwrap();
    assert_eq!(inherits.image_tag().unwrap(), "grin");
    inherits.set("mood", "sad").unwrap();
    assert_eq!(inherits.image_tag().unwrap(), "plain");

    let mut overrides = DDCharacter::with_kind(
        CharacterConfig::new("Ray")
            .with_attributes("mood=happy")
            .with_rule("mood==happy, ray_happy"),
        &kind,
        store,
    )
    .unwrap();
    assert_eq!(overrides.image_tag().unwrap(), "ray_happy");
    assert_eq!(overrides.engine().default_image(), Some("plain"));
}

// =============================================================================
// Configuration
// =============================================================================

/// A character can be configured entirely from JSON.
#[test]
fn test_config_from_json() {
    let config: CharacterConfig = serde_json::from_str(
        r#"{
            "name": "Eileen",
            "attributes": "energy=2",
            "image_tag_map": [
                {"comparators": [{"range": {"attribute": "energy", "min": 0, "max": 2}}], "tag": "eileen_tired"},
                "energy>2, eileen_awake"
            ]
        }"#,
    )
    .unwrap();

    let mut eileen = DDCharacter::new(config, AttributeStore::new()).unwrap();
    assert_eq!(eileen.image_tag().unwrap(), "eileen_tired");

    eileen.set("energy", 7i64).unwrap();
    assert_eq!(eileen.image_tag().unwrap(), "eileen_awake");
}

/// Construction errors are reported before anything is written.
#[test]
fn test_construction_errors() {
    let store = AttributeStore::new();

    let err = DDCharacter::new(
        CharacterConfig::new("Eileen").with_attributes("mood=happy =oops"),
        store.clone(),
    )
    .unwrap_err();
    assert_eq!(
        err,
        CharacterError::EmptyAttributeName {
            token: "=oops".to_string()
        }
    );
    assert_eq!(store.count("Eileen"), 0);

    let err = DDCharacter::new(CharacterConfig::default(), store).unwrap_err();
    assert_eq!(err, CharacterError::EmptyName);
}

// =============================================================================
// Host Boundary
// =============================================================================

/// Show and hide swap the identity token for the resolved tag.
#[test]
fn test_show_hide_through_host() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(eileen_config(), store).unwrap();
    let mut host = RecordingHost::default();

    eileen
        .show(
            &mut host,
            &ImageName::parse("Eileen"),
            &ShowParams::new().at("left").on_layer("master"),
        )
        .unwrap();

    eileen.set("mood", "neutral").unwrap();
    eileen
        .hide(&mut host, &ImageName::parse("Eileen"), None)
        .unwrap();

    assert_eq!(
        host.calls,
        vec![
            "show eileen_happy at=[\"left\"] layer=Some(\"master\")".to_string(),
            "hide eileen layer=None".to_string(),
        ]
    );
}

/// Multi-word tags expand into several name tokens.
#[test]
fn test_multi_word_tag() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(
        CharacterConfig::new("Eileen")
            .with_attributes("mood=happy")
            .with_rule("mood==happy, eileen happy"),
        store,
    )
    .unwrap();

    let name = eileen
        .display_name(&ImageName::parse("Eileen blush"))
        .unwrap();
    assert_eq!(name.tokens(), &["eileen", "happy", "blush"]);
}

/// A character host can be used through a trait object.
#[test]
fn test_dyn_host() {
    let store = AttributeStore::new();
    let mut eileen = DDCharacter::new(eileen_config(), store).unwrap();
    let mut recording = RecordingHost::default();
    let host: &mut dyn DisplayHost = &mut recording;

    eileen
        .show(host, &ImageName::parse("Eileen"), &ShowParams::default())
        .unwrap();
    assert_eq!(recording.calls.len(), 1);
}
