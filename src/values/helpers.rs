//! Boolean and float lexical conversions

use crate::error::{Error, GrammarError, Result};
use std::collections::HashMap;

lazy_static::lazy_static! {
    /// XSD boolean value mapping
    pub static ref XSD_BOOLEAN_MAP: HashMap<&'static str, bool> = {
        let mut m = HashMap::new();
        m.insert("false", false);
        m.insert("0", false);
        m.insert("true", true);
        m.insert("1", true);
        m
    };
}

/// Parse an XSD boolean (`true`, `false`, `1`, `0`)
pub fn parse_boolean(value: &str) -> Result<bool> {
    XSD_BOOLEAN_MAP.get(value.trim()).copied().ok_or_else(|| {
        Error::Grammar(
            GrammarError::new("value is not a valid xs:boolean")
                .with_lexical(value)
                .with_production("true | false | 1 | 0"),
        )
    })
}

/// Canonical boolean form
pub fn boolean_lexical(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Parse an XSD float/double, honoring the `NaN`, `INF` and `-INF`
/// special spellings
pub fn parse_float(value: &str) -> Result<f64> {
    match value.trim() {
        "NaN" => Ok(f64::NAN),
        "INF" => Ok(f64::INFINITY),
        "-INF" => Ok(f64::NEG_INFINITY),
        trimmed => trimmed.parse::<f64>().map_err(|_| {
            Error::Grammar(
                GrammarError::new("value is not a valid xs:float").with_lexical(value),
            )
        }),
    }
}

/// Float lexical form, restoring the special spellings
pub fn float_lexical(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "INF".to_string()
    } else if value == f64::NEG_INFINITY {
        "-INF".to_string()
    } else {
        value.to_string()
    }
}
