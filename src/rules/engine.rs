//! Image tag resolution.
//!
//! The `ResolutionEngine` holds a character's rules in registration order
//! and turns the character's current attributes into one image tag:
//!
//! 1. The first rule whose comparators all hold wins.
//! 2. Otherwise the configured default image.
//! 3. Otherwise a placeholder naming the character, `DDCharacter(<name>)`.
//!
//! Later rules are never consulted once one matches, so registration order
//! is rule priority.

use serde::{Deserialize, Serialize};

use crate::comparators::AttributeSource;
use crate::error::{EvalError, RuleError};

use super::rule::{Rule, RuleSpec};

/// Ordered rule set plus fallback image for one character.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionEngine {
    rules: Vec<Rule>,
    default_image: Option<String>,
}

impl ResolutionEngine {
    /// Create an engine with no rules and no default image.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default image (builder pattern).
    #[must_use]
    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.set_default_image(Some(image.into()));
        self
    }

    /// Add a rule (builder pattern).
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.register(rule);
        self
    }

    /// Append a rule. It has lower priority than every rule before it.
    pub fn register(&mut self, rule: Rule) {
        log::debug!("registered rule #{}: {}", self.rules.len(), rule);
        self.rules.push(rule);
    }

    /// Append several rules, keeping their order.
    pub fn register_all(&mut self, rules: impl IntoIterator<Item = Rule>) {
        for rule in rules {
            self.register(rule);
        }
    }

    /// Validate and append a configured rule.
    pub fn register_spec(&mut self, spec: impl Into<RuleSpec>) -> Result<(), RuleError> {
        let rule = spec.into().into_rule()?;
        self.register(rule);
        Ok(())
    }

    /// Registered rules, highest priority first.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The configured default image, if any.
    #[must_use]
    pub fn default_image(&self) -> Option<&str> {
        self.default_image.as_deref()
    }

    /// Replace the default image. Blank images count as no image.
    pub fn set_default_image(&mut self, image: Option<String>) {
        self.default_image = image
            .map(|image| image.trim().to_string())
            .filter(|image| !image.is_empty());
    }

    /// Find the first rule that matches.
    pub fn matching_rule<S: AttributeSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<Option<&Rule>, EvalError> {
        for (index, rule) in self.rules.iter().enumerate() {
            let matched = rule.matches(source)?;
            log::trace!(
                "{}: rule #{} ({}) {}",
                source.source_name(),
                index,
                rule.tag(),
                if matched { "matched" } else { "did not match" }
            );
            if matched {
                return Ok(Some(rule));
            }
        }
        Ok(None)
    }

    /// Resolve the image tag for a character. Never empty.
    pub fn resolve<S: AttributeSource + ?Sized>(&self, source: &S) -> Result<String, EvalError> {
        if let Some(rule) = self.matching_rule(source)? {
            return Ok(rule.tag().to_string());
        }

        let tag = match &self.default_image {
            Some(image) => image.clone(),
            None => Self::placeholder_for(source.source_name()),
        };
        log::debug!(
            "{}: no rule matched, falling back to {tag:?}",
            source.source_name()
        );
        Ok(tag)
    }

    /// Placeholder tag used when nothing matched and no default is set.
    #[must_use]
    pub fn placeholder_for(name: &str) -> String {
        format!("DDCharacter({})", name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeStore;
    use crate::comparators::Comparator;

    fn happy_rule(tag: &str) -> Rule {
        Rule::when(Comparator::equals("mood", "happy"), tag).unwrap()
    }

    #[test]
    fn test_first_match_wins() {
        let store = AttributeStore::new();
        store.set("Eileen", "mood", "happy");

        let engine = ResolutionEngine::new()
            .with_rule(happy_rule("x"))
            .with_rule(happy_rule("y"));

        assert_eq!(engine.resolve(&store.snapshot("Eileen")).unwrap(), "x");
    }

    #[test]
    fn test_default_image_fallback() {
        let store = AttributeStore::new();
        let engine = ResolutionEngine::new().with_default_image("alice_default");

        assert_eq!(
            engine.resolve(&store.snapshot("Alice")).unwrap(),
            "alice_default"
        );
    }

    #[test]
    fn test_placeholder_fallback() {
        let store = AttributeStore::new();
        let engine = ResolutionEngine::new().with_rule(happy_rule("x"));

        let tag = engine.resolve(&store.snapshot("Alice")).unwrap();
        assert_eq!(tag, "DDCharacter(Alice)");
    }

    #[test]
    fn test_blank_default_is_ignored() {
        let engine = ResolutionEngine::new().with_default_image("   ");
        assert_eq!(engine.default_image(), None);

        let engine = ResolutionEngine::new().with_default_image(" eileen ");
        assert_eq!(engine.default_image(), Some("eileen"));
    }

    #[test]
    fn test_register_preserves_order() {
        let mut engine = ResolutionEngine::new();
        engine.register_all([happy_rule("a"), happy_rule("b")]);
        engine.register_spec("mood==sad, c").unwrap();

        let tags: Vec<&str> = engine.rules().iter().map(Rule::tag).collect();
        assert_eq!(tags, vec!["a", "b", "c"]);
        assert_eq!(engine.len(), 3);
    }

    #[test]
    fn test_register_spec_rejects_malformed() {
        let mut engine = ResolutionEngine::new();
        assert_eq!(engine.register_spec("eileen"), Err(RuleError::NoComparators {
            tag: "eileen".to_string()
        }));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_type_error_surfaces() {
        let store = AttributeStore::new();
        store.set("Eileen", "mood", "happy");

        let engine = ResolutionEngine::new()
            .with_rule(Rule::when(Comparator::greater_than("mood", 3i64), "x").unwrap());

        assert!(matches!(
            engine.resolve(&store.snapshot("Eileen")),
            Err(EvalError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_matching_rule() {
        let store = AttributeStore::new();
        store.set("Eileen", "mood", "sad");

        let engine = ResolutionEngine::new()
            .with_rule(happy_rule("x"))
            .with_rule(Rule::parse("mood==sad, y").unwrap());

        let rule = engine.matching_rule(&store.snapshot("Eileen")).unwrap();
        assert_eq!(rule.map(Rule::tag), Some("y"));
    }
}
