//! Attribute values and literal parsing.
//!
//! Attributes drive which image a character shows ("mood", "pose",
//! "energy"). The engine doesn't interpret them beyond comparing them.
//!
//! ## AttributeValue Types
//!
//! - `Null`: Set but without a value (bare `flag` in a spec string)
//! - `Bool`: Flags (`blushing=True`)
//! - `Int` / `Float`: Numbers (`energy=3`, `scale=0.5`)
//! - `Text`: Everything else (`mood=happy`)

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a character attribute.
///
/// Equality is type-sensitive across kinds (a `Bool` never equals an
/// `Int`) but numeric between `Int` and `Float`, so `Int(3) == Float(3.0)`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Present but unset.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integer number.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// Free text.
    Text(String),
}

/// Coarse kind of an [`AttributeValue`], used for comparison checks and
/// error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    Text,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::Text => "text",
        };
        f.write_str(name)
    }
}

impl AttributeValue {
    /// Parse a raw token from a configuration string.
    ///
    /// The token is trimmed first. Empty input and `None` give `Null`;
    /// `True`/`False` give `Bool` (lower-case `true`/`null` stay text);
    /// integers and floats give numbers; a quoted token gives the text
    /// between the quotes. Anything else is kept as trimmed text.
    #[must_use]
    pub fn parse_literal(raw: &str) -> Self {
        let raw = raw.trim();

        match raw {
            "" | "None" => return AttributeValue::Null,
            "True" => return AttributeValue::Bool(true),
            "False" => return AttributeValue::Bool(false),
            _ => {}
        }

        if let Some(inner) = unquote(raw) {
            return AttributeValue::Text(inner.to_string());
        }

        if let Ok(v) = raw.parse::<i64>() {
            return AttributeValue::Int(v);
        }

        // f64's grammar also takes "inf" and "NaN"; those stay text.
        if raw.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(v) = raw.parse::<f64>() {
                return AttributeValue::Float(v);
            }
        }

        AttributeValue::Text(raw.to_string())
    }

    /// Kind of this value.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            AttributeValue::Null => ValueKind::Null,
            AttributeValue::Bool(_) => ValueKind::Bool,
            AttributeValue::Int(_) | AttributeValue::Float(_) => ValueKind::Number,
            AttributeValue::Text(_) => ValueKind::Text,
        }
    }

    /// Check if this is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Get as bool if this is a Bool value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as float if this is any number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as string reference if this is a Text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

fn unquote(raw: &str) -> Option<&str> {
    let bytes = raw.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
    if first == last && (first == b'"' || first == b'\'') {
        Some(&raw[1..raw.len() - 1])
    } else {
        None
    }
}

/// Order an integer against a float without rounding the integer.
///
/// `None` when the float is NaN.
pub(crate) fn compare_int_float(int: i64, float: f64) -> Option<Ordering> {
    // 2^63, the first float above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    if float >= LIMIT {
        return Some(Ordering::Less);
    }
    if float < -LIMIT {
        return Some(Ordering::Greater);
    }

    // In range, so the truncated float converts exactly
    let whole = float.trunc();
    let ordering = int.cmp(&(whole as i64)).then_with(|| {
        let fract = float - whole;
        if fract > 0.0 {
            Ordering::Less
        } else if fract < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });
    Some(ordering)
}

impl PartialEq for AttributeValue {
    fn eq(&self, other: &Self) -> bool {
        use AttributeValue::*;

        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) | (Float(b), Int(a)) => {
                compare_int_float(*a, *b) == Some(Ordering::Equal)
            }
            (Text(a), Text(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => f.write_str("null"),
            AttributeValue::Bool(v) => write!(f, "{v}"),
            AttributeValue::Int(v) => write!(f, "{v}"),
            AttributeValue::Float(v) => write!(f, "{v}"),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

// Convenient From implementations
impl From<bool> for AttributeValue {
    fn from(v: bool) -> Self {
        AttributeValue::Bool(v)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::Int(v)
    }
}

impl From<i32> for AttributeValue {
    fn from(v: i32) -> Self {
        AttributeValue::Int(v as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::Float(v)
    }
}

impl From<String> for AttributeValue {
    fn from(v: String) -> Self {
        AttributeValue::Text(v)
    }
}

impl From<&str> for AttributeValue {
    fn from(v: &str) -> Self {
        AttributeValue::Text(v.to_string())
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttributeValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_scalars() {
        assert_eq!(AttributeValue::parse_literal("3"), AttributeValue::Int(3));
        assert_eq!(AttributeValue::parse_literal(" -12 "), AttributeValue::Int(-12));
        assert_eq!(AttributeValue::parse_literal("0.5"), AttributeValue::Float(0.5));
        assert_eq!(AttributeValue::parse_literal("1e3"), AttributeValue::Float(1000.0));
        assert_eq!(AttributeValue::parse_literal("True"), AttributeValue::Bool(true));
        assert_eq!(AttributeValue::parse_literal("False"), AttributeValue::Bool(false));
    }

    #[test]
    fn test_parse_literal_lowercase_words_are_text() {
        for word in ["true", "false", "null", "none"] {
            assert_eq!(
                AttributeValue::parse_literal(word),
                AttributeValue::Text(word.to_string())
            );
        }
    }

    #[test]
    fn test_parse_literal_null() {
        assert!(AttributeValue::parse_literal("").is_null());
        assert!(AttributeValue::parse_literal("   ").is_null());
        assert!(AttributeValue::parse_literal("None").is_null());
    }

    #[test]
    fn test_parse_literal_text_fallback() {
        assert_eq!(
            AttributeValue::parse_literal(" happy "),
            AttributeValue::Text("happy".to_string())
        );
        assert_eq!(
            AttributeValue::parse_literal("inf"),
            AttributeValue::Text("inf".to_string())
        );
        assert_eq!(
            AttributeValue::parse_literal("NaN"),
            AttributeValue::Text("NaN".to_string())
        );
    }

    #[test]
    fn test_parse_literal_quoted() {
        assert_eq!(
            AttributeValue::parse_literal("'3'"),
            AttributeValue::Text("3".to_string())
        );
        assert_eq!(
            AttributeValue::parse_literal("\"True\""),
            AttributeValue::Text("True".to_string())
        );
        // Mismatched quotes are not a string literal
        assert_eq!(
            AttributeValue::parse_literal("'x\""),
            AttributeValue::Text("'x\"".to_string())
        );
    }

    #[test]
    fn test_equality_is_numeric_across_int_and_float() {
        assert_eq!(AttributeValue::Int(3), AttributeValue::Float(3.0));
        assert_ne!(AttributeValue::Int(3), AttributeValue::Float(3.5));
        assert_ne!(AttributeValue::Bool(true), AttributeValue::Int(1));
        assert_ne!(AttributeValue::Text("3".into()), AttributeValue::Int(3));
        assert_ne!(AttributeValue::Null, AttributeValue::Bool(false));
    }

    #[test]
    fn test_equality_is_exact_for_large_numbers() {
        // 2^53 + 1 has no f64 representation
        let big = 9_007_199_254_740_993i64;
        assert_ne!(AttributeValue::Int(big), AttributeValue::Float(9_007_199_254_740_992.0));
        assert_ne!(AttributeValue::Float(9_007_199_254_740_992.0), AttributeValue::Int(big));
        assert_eq!(
            AttributeValue::Int(big - 1),
            AttributeValue::Float(9_007_199_254_740_992.0)
        );
        assert_ne!(AttributeValue::Int(i64::MAX), AttributeValue::Float(9.223_372_036_854_775_808e18));
    }

    #[test]
    fn test_compare_int_float() {
        assert_eq!(compare_int_float(3, 3.0), Some(Ordering::Equal));
        assert_eq!(compare_int_float(3, 3.5), Some(Ordering::Less));
        assert_eq!(compare_int_float(-2, -2.5), Some(Ordering::Greater));
        assert_eq!(compare_int_float(-3, -2.5), Some(Ordering::Less));
        assert_eq!(compare_int_float(i64::MAX, f64::INFINITY), Some(Ordering::Less));
        assert_eq!(compare_int_float(i64::MIN, f64::NEG_INFINITY), Some(Ordering::Greater));
        assert_eq!(compare_int_float(i64::MIN, -9.223_372_036_854_775_808e18), Some(Ordering::Equal));
        assert_eq!(compare_int_float(0, f64::NAN), None);
    }

    #[test]
    fn test_kind() {
        assert_eq!(AttributeValue::Float(1.0).kind(), ValueKind::Number);
        assert_eq!(AttributeValue::Int(1).kind(), ValueKind::Number);
        assert_eq!(AttributeValue::from("x").kind(), ValueKind::Text);
        assert_eq!(AttributeValue::Null.kind(), ValueKind::Null);
    }

    #[test]
    fn test_attribute_value_from() {
        let int: AttributeValue = 42i32.into();
        assert_eq!(int.as_int(), Some(42));

        let boolean: AttributeValue = true.into();
        assert_eq!(boolean.as_bool(), Some(true));

        let text: AttributeValue = "sitting".into();
        assert_eq!(text.as_text(), Some("sitting"));

        let none: AttributeValue = Option::<i64>::None.into();
        assert!(none.is_null());
    }

    #[test]
    fn test_untagged_serialization() {
        let json = serde_json::to_string(&AttributeValue::Int(3)).unwrap();
        assert_eq!(json, "3");

        let back: AttributeValue = serde_json::from_str("\"happy\"").unwrap();
        assert_eq!(back, AttributeValue::from("happy"));

        let null: AttributeValue = serde_json::from_str("null").unwrap();
        assert!(null.is_null());
    }
}
