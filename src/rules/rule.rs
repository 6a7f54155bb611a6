//! Image tag rules.
//!
//! A rule pairs a chain of comparators with the image tag to use when all
//! of them hold. Rules are validated when built, so a malformed rule never
//! reaches resolution.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::comparators::{find_unquoted, AttributeSource, Comparator};
use crate::error::{EvalError, RuleError};

/// Comparator storage. Most rules test one to three attributes.
pub type ComparatorChain = SmallVec<[Comparator; 4]>;

/// A conjunction of comparators and the tag it selects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRule")]
pub struct Rule {
    comparators: ComparatorChain,
    tag: String,
}

#[derive(Deserialize)]
struct RawRule {
    comparators: Vec<Comparator>,
    tag: String,
}

impl TryFrom<RawRule> for Rule {
    type Error = RuleError;

    fn try_from(raw: RawRule) -> Result<Self, Self::Error> {
        Rule::new(raw.comparators, raw.tag)
    }
}

impl Rule {
    /// Create a rule. Needs at least one comparator and a non-blank tag.
    ///
    /// The tag is stored trimmed.
    pub fn new(
        comparators: impl IntoIterator<Item = Comparator>,
        tag: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let tag = tag.into().trim().to_string();
        if tag.is_empty() {
            return Err(RuleError::EmptyTag);
        }

        let comparators: ComparatorChain = comparators.into_iter().collect();
        if comparators.is_empty() {
            return Err(RuleError::NoComparators { tag });
        }

        Ok(Self { comparators, tag })
    }

    /// Create a single-comparator rule.
    pub fn when(comparator: Comparator, tag: impl Into<String>) -> Result<Self, RuleError> {
        Self::new([comparator], tag)
    }

    /// Parse the comma-delimited form: `comparator, comparator, ..., tag`.
    ///
    /// The last token is the tag and is never evaluated. Commas inside a
    /// quoted value don't split. See [`Comparator::parse`] for the
    /// comparator grammar.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        if text.trim().is_empty() {
            return Err(RuleError::Empty);
        }

        let mut comparators = ComparatorChain::new();
        let mut rest = text;
        while let Some(at) = find_unquoted(rest, ",") {
            comparators.push(Comparator::parse(&rest[..at])?);
            rest = &rest[at + 1..];
        }

        if comparators.is_empty() {
            return Err(RuleError::NoComparators {
                tag: rest.trim().to_string(),
            });
        }

        Self::new(comparators, rest)
    }

    /// The comparators, in evaluation order.
    #[must_use]
    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    /// The image tag this rule selects.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Check if every comparator holds. Stops at the first one that doesn't.
    pub fn matches<S: AttributeSource + ?Sized>(&self, source: &S) -> Result<bool, EvalError> {
        for comparator in &self.comparators {
            if !comparator.eval(source)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for comparator in &self.comparators {
            write!(f, "{comparator}, ")?;
        }
        f.write_str(&self.tag)
    }
}

/// A rule as it appears in configuration: either built or still text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSpec {
    Rule(Rule),
    Text(String),
}

impl RuleSpec {
    /// Validate into a [`Rule`].
    pub fn into_rule(self) -> Result<Rule, RuleError> {
        match self {
            RuleSpec::Rule(rule) => Ok(rule),
            RuleSpec::Text(text) => Rule::parse(&text),
        }
    }
}

impl From<Rule> for RuleSpec {
    fn from(rule: Rule) -> Self {
        RuleSpec::Rule(rule)
    }
}

impl From<&str> for RuleSpec {
    fn from(text: &str) -> Self {
        RuleSpec::Text(text.to_string())
    }
}

impl From<String> for RuleSpec {
    fn from(text: String) -> Self {
        RuleSpec::Text(text)
    }
}
