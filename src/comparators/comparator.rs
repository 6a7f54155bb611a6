//! Attribute comparators.
//!
//! A comparator tests one attribute of a character against a fixed
//! reference. Rules chain comparators together; the engine provides the
//! four comparison shapes and nothing more.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::attributes::{compare_int_float, AttributeValue};
use crate::error::{EvalError, RuleError};

use super::AttributeSource;

/// A predicate over one attribute.
///
/// Evaluating against a character that doesn't have the attribute is
/// `Ok(false)`. Ordering comparisons between different value kinds are
/// [`EvalError::TypeMismatch`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Stored value equals the reference.
    Equivalence {
        attribute: String,
        value: AttributeValue,
    },

    /// Stored value is strictly less than the reference.
    LessThan {
        attribute: String,
        value: AttributeValue,
    },

    /// Stored value is strictly greater than the reference.
    GreaterThan {
        attribute: String,
        value: AttributeValue,
    },

    /// Stored value is within `[min, max]`, inclusive both ends.
    Range {
        attribute: String,
        min: AttributeValue,
        max: AttributeValue,
    },
}

impl Comparator {
    /// Create an equivalence comparator.
    pub fn equals(attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::Equivalence {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a less-than comparator.
    pub fn less_than(attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::LessThan {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a greater-than comparator.
    pub fn greater_than(attribute: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::GreaterThan {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create an inclusive range comparator.
    pub fn range(
        attribute: impl Into<String>,
        min: impl Into<AttributeValue>,
        max: impl Into<AttributeValue>,
    ) -> Self {
        Self::Range {
            attribute: attribute.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    /// Name of the attribute this comparator reads.
    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            Self::Equivalence { attribute, .. }
            | Self::LessThan { attribute, .. }
            | Self::GreaterThan { attribute, .. }
            | Self::Range { attribute, .. } => attribute,
        }
    }

    /// Evaluate against a character's attributes.
    pub fn eval<S: AttributeSource + ?Sized>(&self, source: &S) -> Result<bool, EvalError> {
        let attribute = self.attribute();
        if !source.contains_attribute(attribute) {
            return Ok(false);
        }
        let Some(stored) = source.attribute(attribute) else {
            return Ok(false);
        };

        match self {
            Self::Equivalence { value, .. } => Ok(stored == *value),

            Self::LessThan { value, .. } => {
                Ok(compare(attribute, &stored, value)? == Some(Ordering::Less))
            }

            Self::GreaterThan { value, .. } => {
                Ok(compare(attribute, &stored, value)? == Some(Ordering::Greater))
            }

            Self::Range { min, max, .. } => {
                let above_min = matches!(
                    compare(attribute, &stored, min)?,
                    Some(Ordering::Greater | Ordering::Equal)
                );
                let below_max = matches!(
                    compare(attribute, &stored, max)?,
                    Some(Ordering::Less | Ordering::Equal)
                );
                Ok(above_min && below_max)
            }
        }
    }

    /// Parse the textual comparator form.
    ///
    /// - `attr in MIN..MAX`: range
    /// - `attr==VALUE`: equivalence
    /// - `attr<VALUE`: less than
    /// - `attr>VALUE`: greater than
    ///
    /// The earliest operator splits the attribute name from the rest, so
    /// values may contain operator text. Values go through
    /// [`AttributeValue::parse_literal`]; quote a value (`'a..b'`) to keep
    /// `..` or `,` inside it. `<=`, `>=` and `===` are rejected.
    pub fn parse(token: &str) -> Result<Self, RuleError> {
        let text = token.trim();

        let Some((at, operator)) = OPERATORS
            .iter()
            .filter_map(|op| text.find(op).map(|at| (at, *op)))
            .min_by_key(|(at, _)| *at)
        else {
            return Err(RuleError::malformed(
                token,
                "expected one of `==`, `<`, `>` or `in MIN..MAX`",
            ));
        };

        let attribute = attribute_name(token, &text[..at])?;
        let rest = &text[at + operator.len()..];

        match operator {
            RANGE => {
                let split = find_unquoted(rest, "..")
                    .ok_or_else(|| RuleError::malformed(token, "range needs MIN..MAX"))?;
                Ok(Self::range(
                    attribute,
                    reference_value(token, &rest[..split])?,
                    reference_value(token, &rest[split + 2..])?,
                ))
            }
            EQUALS => Ok(Self::equals(attribute, reference_value(token, rest)?)),
            LESS => Ok(Self::less_than(attribute, reference_value(token, rest)?)),
            _ => Ok(Self::greater_than(attribute, reference_value(token, rest)?)),
        }
    }
}

const EQUALS: &str = "==";
const LESS: &str = "<";
const GREATER: &str = ">";
const RANGE: &str = " in ";
const OPERATORS: [&str; 4] = [EQUALS, LESS, GREATER, RANGE];

fn attribute_name<'a>(token: &str, raw: &'a str) -> Result<&'a str, RuleError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(RuleError::malformed(token, "missing attribute name"));
    }
    if name.contains(char::is_whitespace) {
        return Err(RuleError::malformed(token, "attribute name must be one word"));
    }
    Ok(name)
}

fn reference_value(token: &str, raw: &str) -> Result<AttributeValue, RuleError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RuleError::malformed(token, "missing reference value"));
    }
    if raw.starts_with(|c: char| matches!(c, '=' | '<' | '>')) {
        return Err(RuleError::malformed(
            token,
            "unsupported operator; use `<`, `>`, `==` or `in MIN..MAX`",
        ));
    }
    Ok(AttributeValue::parse_literal(raw))
}

/// Byte offset of the first `pat` in `text` that is not inside a quoted
/// value.
///
/// A quote opens a value only at the start of `text` or right after an
/// operator, ` in ` or `..`, and only if a matching quote closes it.
/// Apostrophes inside bare words are plain characters.
pub(crate) fn find_unquoted(text: &str, pat: &str) -> Option<usize> {
    let mut at = 0;
    while at < text.len() {
        let rest = &text[at..];
        if rest.starts_with(pat) {
            return Some(at);
        }
        let c = rest.chars().next()?;
        if (c == '\'' || c == '"') && opens_value(&text[..at]) {
            if let Some(close) = rest[1..].find(c) {
                at += close + 2;
                continue;
            }
        }
        at += c.len_utf8();
    }
    None
}

fn opens_value(prefix: &str) -> bool {
    let prefix = prefix.trim_end();
    prefix.is_empty()
        || prefix.ends_with(|c: char| matches!(c, '=' | '<' | '>'))
        || prefix.ends_with("..")
        || prefix.ends_with(" in")
}

/// Order two values of the same kind.
///
/// `Ok(None)` means the kinds match but the values are unordered (NaN).
fn compare(
    attribute: &str,
    stored: &AttributeValue,
    reference: &AttributeValue,
) -> Result<Option<Ordering>, EvalError> {
    use AttributeValue::*;

    match (stored, reference) {
        (Int(a), Int(b)) => Ok(Some(a.cmp(b))),
        (Float(a), Float(b)) => Ok(a.partial_cmp(b)),
        (Int(a), Float(b)) => Ok(compare_int_float(*a, *b)),
        (Float(a), Int(b)) => Ok(compare_int_float(*b, *a).map(Ordering::reverse)),
        (Text(a), Text(b)) => Ok(Some(a.cmp(b))),
        (Bool(a), Bool(b)) => Ok(Some(a.cmp(b))),
        _ => Err(EvalError::TypeMismatch {
            attribute: attribute.to_string(),
            stored: stored.kind(),
            reference: reference.kind(),
        }),
    }
}

impl FromStr for Comparator {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equivalence { attribute, value } => {
                write!(f, "{attribute}=={}", Literal(value))
            }
            Self::LessThan { attribute, value } => write!(f, "{attribute}<{}", Literal(value)),
            Self::GreaterThan { attribute, value } => {
                write!(f, "{attribute}>{}", Literal(value))
            }
            Self::Range {
                attribute,
                min,
                max,
            } => write!(f, "{attribute} in {}..{}", Literal(min), Literal(max)),
        }
    }
}

/// Writes a value so that parsing it back yields the same value.
struct Literal<'a>(&'a AttributeValue);

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            AttributeValue::Null => f.write_str("None"),
            AttributeValue::Bool(true) => f.write_str("True"),
            AttributeValue::Bool(false) => f.write_str("False"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            // Keep the decimal point so it reads back as a float
            AttributeValue::Float(v) => write!(f, "{v:?}"),
            AttributeValue::Text(s) if needs_quotes(s) => {
                let quote = if s.contains('\'') { '"' } else { '\'' };
                write!(f, "{quote}{s}{quote}")
            }
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

/// Text that would read back differently, or split a comparator or rule.
fn needs_quotes(text: &str) -> bool {
    const SEPARATORS: [&str; 6] = [EQUALS, LESS, GREATER, RANGE, ",", ".."];

    AttributeValue::parse_literal(text).as_text() != Some(text)
        || text.starts_with(|c: char| matches!(c, '=' | '\'' | '"'))
        || SEPARATORS.iter().any(|sep| text.contains(sep))
}
