//! Attribute specification strings.
//!
//! Characters can seed their attributes from a single string:
//!
//! ```text
//! mood=happy energy=3 pose,standing blushing
//! ```
//!
//! Tokens are separated by whitespace. Each token is split at its first
//! `=`, or its first `,` when there is no `=`. A bare key gets `Null`.

use crate::error::{CharacterError, Result};

use super::value::AttributeValue;

/// Parse an attribute specification into `(name, value)` pairs.
///
/// Pairs come back in token order; a repeated key appears twice and the
/// later value wins once written to a store.
pub fn parse_attribute_spec(spec: &str) -> Result<Vec<(String, AttributeValue)>> {
    spec.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<(String, AttributeValue)> {
    let (name, raw) = token
        .split_once('=')
        .or_else(|| token.split_once(','))
        .unwrap_or((token, ""));

    let name = name.trim();
    if name.is_empty() {
        return Err(CharacterError::EmptyAttributeName {
            token: token.to_string(),
        });
    }

    Ok((name.to_string(), AttributeValue::parse_literal(raw)))
}
