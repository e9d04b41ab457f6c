//! XSD nonNegativeInteger values
//!
//! A value picks the narrowest of {u32, u64, arbitrary-precision digit
//! string} that exactly represents the input. The choice is a
//! representation optimization only: comparison and lexical output are
//! identical for numerically equal inputs regardless of spelling or of
//! which representation was chosen.

use crate::error::{Error, GrammarError, RangeError, Result};
use std::cmp::Ordering;
use std::fmt;

const U32_MAX_DIGITS: &str = "4294967295";
const U64_MAX_DIGITS: &str = "18446744073709551615";

/// An XSD nonNegativeInteger with narrowest-representation backing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonNegativeInteger {
    repr: Repr,
}

/// Backing representations. Dispatch is a pure function of the numeric
/// magnitude, so two equal values always carry the same variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Repr {
    Small(u32),
    Medium(u64),
    Big(String),
}

impl NonNegativeInteger {
    /// Parse a lexical nonNegativeInteger: optional `+`, digits.
    ///
    /// A `-` sign is a range error unless every digit is zero (the value
    /// `-0` is still zero, hence in the domain).
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value.strip_prefix('+').unwrap_or(value)),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Grammar(
                GrammarError::new("value is not a valid xs:nonNegativeInteger")
                    .with_lexical(value)
                    .with_production("[+-]?[0-9]+"),
            ));
        }

        let canonical = digits.trim_start_matches('0');
        if negative && !canonical.is_empty() {
            return Err(Error::Range(RangeError::new(
                "nonNegativeInteger",
                value,
                "x >= 0",
            )));
        }

        Ok(Self {
            repr: dispatch(canonical),
        })
    }

    /// Construct from a machine integer
    pub fn from_u64(value: u64) -> Self {
        Self {
            repr: if let Ok(small) = u32::try_from(value) {
                Repr::Small(small)
            } else {
                Repr::Medium(value)
            },
        }
    }

    /// The value as a u64, if it fits
    pub fn as_u64(&self) -> Option<u64> {
        match &self.repr {
            Repr::Small(v) => Some(u64::from(*v)),
            Repr::Medium(v) => Some(*v),
            Repr::Big(_) => None,
        }
    }

    /// Canonical lexical form: no sign, no leading zeros
    pub fn lexical(&self) -> String {
        match &self.repr {
            Repr::Small(v) => v.to_string(),
            Repr::Medium(v) => v.to_string(),
            Repr::Big(digits) => digits.clone(),
        }
    }

    /// Compare two values numerically, independent of representation
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.as_u64(), other.as_u64()) {
            (Some(a), Some(b)) => a.cmp(&b),
            // A string-backed value is always above the u64 range
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (&self.repr, &other.repr) {
                (Repr::Big(a), Repr::Big(b)) => compare_digits(a, b),
                _ => unreachable!("as_u64 is None only for Repr::Big"),
            },
        }
    }
}

/// Select the narrowest adequate representation for a canonical
/// (sign-free, no leading zeros) digit string
fn dispatch(canonical: &str) -> Repr {
    if canonical.is_empty() {
        return Repr::Small(0);
    }
    if compare_digits(canonical, U32_MAX_DIGITS) != Ordering::Greater {
        Repr::Small(canonical.parse().expect("within u32 range"))
    } else if compare_digits(canonical, U64_MAX_DIGITS) != Ordering::Greater {
        Repr::Medium(canonical.parse().expect("within u64 range"))
    } else {
        Repr::Big(canonical.to_string())
    }
}

/// Order two sign-free, zero-stripped digit strings numerically
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl fmt::Display for NonNegativeInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

impl PartialOrd for NonNegativeInteger {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for NonNegativeInteger {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
