//! Error types.
//!
//! Three families:
//! - [`RuleError`]: malformed rule or comparator specifications, reported
//!   when the rule is built.
//! - [`EvalError`]: ordering comparisons between incompatible value kinds,
//!   reported when a comparator is evaluated.
//! - [`CharacterError`]: character construction and anything bubbling up
//!   from the two above.
//!
//! A missing attribute is never an error. Comparators treat it as false and
//! lookups return `None`.

use thiserror::Error;

use crate::attributes::ValueKind;

/// A rule or comparator specification could not be built.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("rule specification is empty")]
    Empty,

    #[error("rule for tag {tag:?} has no comparators")]
    NoComparators { tag: String },

    #[error("rule tag is empty")]
    EmptyTag,

    #[error("malformed comparator {token:?}: {reason}")]
    MalformedComparator { token: String, reason: String },
}

impl RuleError {
    pub(crate) fn malformed(token: &str, reason: impl Into<String>) -> Self {
        Self::MalformedComparator {
            token: token.to_string(),
            reason: reason.into(),
        }
    }
}

/// A comparator could not be evaluated.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    #[error("cannot compare attribute {attribute:?} of kind {stored} against {reference}")]
    TypeMismatch {
        attribute: String,
        stored: ValueKind,
        reference: ValueKind,
    },
}

/// A character could not be built or resolved.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum CharacterError {
    #[error("character name must not be empty")]
    EmptyName,

    #[error("attribute token {token:?} has an empty name")]
    EmptyAttributeName { token: String },

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T, E = CharacterError> = std::result::Result<T, E>;
