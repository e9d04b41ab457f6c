//! XSD decimal values
//!
//! A decimal owns its exact lexical string and never loses precision by
//! converting to a machine float except through the explicit lossy
//! accessor. Comparison is a total order over the exact decimal value,
//! independent of fraction-digit padding: `"1.50"` compares equal to
//! `"1.5"` while both lexical strings are preserved verbatim.

use crate::error::{Error, GrammarError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").unwrap());

/// An arbitrary-precision XSD decimal value
#[derive(Debug, Clone)]
pub struct Decimal {
    lexical: String,
}

impl Decimal {
    /// Parse a lexical decimal: optional sign, integer digits, optional
    /// single `.` followed by fraction digits
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if !DECIMAL.is_match(value) {
            return Err(Error::Grammar(
                GrammarError::new("value is not a valid xs:decimal")
                    .with_lexical(value)
                    .with_production("[+-]?[0-9]+(.[0-9]+)?"),
            ));
        }
        Ok(Self {
            lexical: value.to_string(),
        })
    }

    /// The preserved lexical form
    pub fn lexical(&self) -> &str {
        &self.lexical
    }

    /// True if the exact value is zero (any spelling of zero)
    pub fn is_zero(&self) -> bool {
        self.lexical.bytes().all(|b| !b.is_ascii_digit() || b == b'0')
    }

    /// True if the lexical form carries a negative sign
    pub fn is_negative(&self) -> bool {
        self.lexical.starts_with('-')
    }

    /// Lossy conversion to a machine float
    pub fn to_f64(&self) -> f64 {
        // The stored lexical is always valid float syntax
        self.lexical.parse().unwrap_or(f64::NAN)
    }

    /// Compare two decimals over their exact values.
    ///
    /// Same-sign magnitudes are compared by zero-padding both fraction
    /// tails and both integer heads to equal length, then comparing the
    /// digit strings lexicographically, which orders the same as
    /// numerically for equal-length sign-free decimal digit strings.
    pub fn compare(&self, other: &Decimal) -> Ordering {
        // Every spelling of zero is equal, including "-0"
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }

        let (a_neg, a) = split_sign(&self.lexical);
        let (b_neg, b) = split_sign(&other.lexical);

        match (a_neg, b_neg) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => compare_magnitudes(a, b),
            (true, true) => compare_magnitudes(b, a),
        }
    }
}

fn split_sign(lexical: &str) -> (bool, &str) {
    if let Some(rest) = lexical.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = lexical.strip_prefix('+') {
        (false, rest)
    } else {
        (false, lexical)
    }
}

fn compare_magnitudes(a: &str, b: &str) -> Ordering {
    let (a_int, a_frac) = split_point(a);
    let (b_int, b_frac) = split_point(b);

    let int_len = a_int.len().max(b_int.len());
    let frac_len = a_frac.len().max(b_frac.len());

    let pad = |int: &str, frac: &str| {
        let mut digits = String::with_capacity(int_len + frac_len);
        for _ in int.len()..int_len {
            digits.push('0');
        }
        digits.push_str(int);
        digits.push_str(frac);
        for _ in frac.len()..frac_len {
            digits.push('0');
        }
        digits
    };

    pad(a_int, a_frac).cmp(&pad(b_int, b_frac))
}

fn split_point(magnitude: &str) -> (&str, &str) {
    match magnitude.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (magnitude, ""),
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
