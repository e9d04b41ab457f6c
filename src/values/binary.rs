//! XSD binary values: hexBinary and base64Binary

use crate::error::{Error, GrammarError, Result};
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_BINARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9a-fA-F]{2})*$").unwrap());

/// Parse a hexBinary lexical form into bytes
pub fn parse_hex_binary(value: &str) -> Result<Vec<u8>> {
    let value = value.trim();
    if !HEX_BINARY.is_match(value) {
        return Err(Error::Grammar(
            GrammarError::new("value is not a valid xs:hexBinary")
                .with_lexical(value)
                .with_production("([0-9a-fA-F]{2})*"),
        ));
    }

    (0..value.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&value[i..i + 2], 16).map_err(|_| {
                Error::Grammar(GrammarError::new("invalid hex byte").with_lexical(value))
            })
        })
        .collect()
}

/// Canonical hexBinary form: upper-case hex digits
pub fn hex_binary_lexical(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Parse a base64Binary lexical form into bytes; embedded spaces are
/// tolerated per the XSD lexical space
pub fn parse_base64_binary(value: &str) -> Result<Vec<u8>> {
    let cleaned = value.replace(' ', "");
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    base64::engine::general_purpose::STANDARD
        .decode(&cleaned)
        .map_err(|_| {
            Error::Grammar(
                GrammarError::new("value is not a valid xs:base64Binary").with_lexical(value),
            )
        })
}

/// Canonical base64Binary form: standard alphabet, no whitespace
pub fn base64_binary_lexical(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}
