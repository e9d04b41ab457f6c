//! XSD duration values
//!
//! A duration is a signed month-count plus a signed millisecond-count
//! with independent magnitudes: one month is not convertible to a fixed
//! number of milliseconds, so the two axes are never normalized against
//! each other.

use crate::error::{Error, GrammarError, RangeError, Result};
use std::fmt;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// An XSD duration value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Duration {
    months: i64,
    millis: i64,
}

impl Duration {
    /// Construct from a month count and a millisecond count
    pub fn new(months: i64, millis: i64) -> Self {
        Self { months, millis }
    }

    /// Parse the lexical form `[-]P[nY][nM][nD][T[nH][nM][nS]]`.
    ///
    /// Fragments must appear at most once and in grammar order; a `T`
    /// must be followed by at least one time fragment; at least one
    /// fragment must be present overall. Fractional seconds round to
    /// milliseconds, half away from zero.
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let scanner = Scanner::new(value);
        scanner.run()
    }

    /// Signed month count
    pub fn months(&self) -> i64 {
        self.months
    }

    /// Signed millisecond count
    pub fn milliseconds(&self) -> i64 {
        self.millis
    }

    /// Canonical lexical form: only non-zero fragments are emitted, and a
    /// duration of zero has the single spelling `P0D`
    pub fn lexical(&self) -> String {
        if self.months == 0 && self.millis == 0 {
            return "P0D".to_string();
        }

        let mut out = String::new();
        if self.months < 0 || self.millis < 0 {
            out.push('-');
        }
        out.push('P');

        let months = self.months.unsigned_abs();
        let years = months / 12;
        let months = months % 12;
        if years > 0 {
            out.push_str(&format!("{}Y", years));
        }
        if months > 0 {
            out.push_str(&format!("{}M", months));
        }

        let mut millis = self.millis.unsigned_abs();
        let days = millis / MILLIS_PER_DAY as u64;
        millis %= MILLIS_PER_DAY as u64;
        let hours = millis / MILLIS_PER_HOUR as u64;
        millis %= MILLIS_PER_HOUR as u64;
        let minutes = millis / MILLIS_PER_MINUTE as u64;
        millis %= MILLIS_PER_MINUTE as u64;
        let seconds = millis / MILLIS_PER_SECOND as u64;
        let frac = millis % MILLIS_PER_SECOND as u64;

        if days > 0 {
            out.push_str(&format!("{}D", days));
        }
        if hours > 0 || minutes > 0 || seconds > 0 || frac > 0 {
            out.push('T');
            if hours > 0 {
                out.push_str(&format!("{}H", hours));
            }
            if minutes > 0 {
                out.push_str(&format!("{}M", minutes));
            }
            if frac > 0 {
                let frac = format!("{:03}", frac);
                out.push_str(&format!("{}.{}S", seconds, frac.trim_end_matches('0')));
            } else if seconds > 0 {
                out.push_str(&format!("{}S", seconds));
            }
        }
        out
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// Fragment scanner
// =============================================================================

/// Two-phase fragment scanner. Phase 1 covers Y/M/D before the optional
/// `T`, phase 2 covers H/M/S after it; within each phase every fragment
/// must strictly advance a monotonic stage counter.
struct Scanner<'a> {
    input: &'a str,
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, rest: input }
    }

    fn run(mut self) -> Result<Duration> {
        let negative = if let Some(rest) = self.rest.strip_prefix('-') {
            self.rest = rest;
            true
        } else {
            false
        };
        self.rest = self
            .rest
            .strip_prefix('P')
            .ok_or_else(|| self.grammar_error("duration must start with 'P'"))?;

        let mut months: i64 = 0;
        let mut millis: i64 = 0;
        let mut fragments = 0usize;

        // Phase 1: Y, M, D in strictly increasing stage order
        let mut stage = 0u8;
        while let Some((number, designator)) = self.peek_fragment()? {
            let next_stage = match designator {
                'Y' => 1,
                'M' => 2,
                'D' => 3,
                _ => break,
            };
            if next_stage <= stage {
                return Err(self.grammar_error("duration fragment out of order or repeated"));
            }
            stage = next_stage;
            self.consume_fragment();
            fragments += 1;
            let amount = parse_amount(self.input, &number)?;
            match designator {
                'Y' => months = add(self.input, months, mul(self.input, amount, 12)?)?,
                'M' => months = add(self.input, months, amount)?,
                'D' => millis = add(self.input, millis, mul(self.input, amount, MILLIS_PER_DAY)?)?,
                _ => unreachable!(),
            }
        }

        // Phase 2: T introduces H, M, S under the same discipline
        if let Some(rest) = self.rest.strip_prefix('T') {
            self.rest = rest;
            let mut stage = 0u8;
            let mut time_fragments = 0usize;
            while let Some((number, designator)) = self.peek_fragment()? {
                let next_stage = match designator {
                    'H' => 1,
                    'M' => 2,
                    'S' => 3,
                    _ => break,
                };
                if next_stage <= stage {
                    return Err(self.grammar_error("duration fragment out of order or repeated"));
                }
                stage = next_stage;
                self.consume_fragment();
                time_fragments += 1;
                match designator {
                    'H' => {
                        let amount = parse_amount(self.input, &number)?;
                        millis = add(self.input, millis, mul(self.input, amount, MILLIS_PER_HOUR)?)?;
                    }
                    'M' => {
                        let amount = parse_amount(self.input, &number)?;
                        millis =
                            add(self.input, millis, mul(self.input, amount, MILLIS_PER_MINUTE)?)?;
                    }
                    'S' => {
                        millis = add(self.input, millis, parse_seconds(self.input, &number)?)?;
                    }
                    _ => unreachable!(),
                }
            }
            if time_fragments == 0 {
                return Err(self.grammar_error("'T' must be followed by a time fragment"));
            }
            fragments += time_fragments;
        }

        if !self.rest.is_empty() {
            return Err(self.grammar_error("trailing characters after duration"));
        }
        if fragments == 0 {
            return Err(self.grammar_error("duration must contain at least one fragment"));
        }

        if negative {
            months = -months;
            millis = -millis;
        }
        Ok(Duration { months, millis })
    }

    /// Look at the next `<number><designator>` pair without consuming it.
    /// Seconds may carry a single fractional part.
    fn peek_fragment(&self) -> Result<Option<(String, char)>> {
        let bytes = self.rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == 0 {
            return Ok(None);
        }
        if i < bytes.len() && bytes[i] == b'.' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            if j == i + 1 {
                return Err(self.grammar_error("fraction must have digits"));
            }
            i = j;
        }
        match bytes.get(i) {
            Some(&d) => Ok(Some((self.rest[..i].to_string(), d as char))),
            None => Err(self.grammar_error("number without a designator")),
        }
    }

    fn consume_fragment(&mut self) {
        // peek_fragment validated the shape; skip number + designator
        let bytes = self.rest.as_bytes();
        let mut i = 0;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        self.rest = &self.rest[i + 1..];
    }

    fn grammar_error(&self, message: &str) -> Error {
        GrammarError::new(message)
            .with_lexical(self.input)
            .with_production("[-]P[nY][nM][nD][T[nH][nM][nS]]")
            .into()
    }
}

fn parse_amount(input: &str, number: &str) -> Result<i64> {
    if number.contains('.') {
        return Err(GrammarError::new("only the seconds fragment may be fractional")
            .with_lexical(input)
            .into());
    }
    number
        .parse()
        .map_err(|_| RangeError::new("duration fragment", number, "within the i64 range").into())
}

/// Seconds to milliseconds: `round(seconds * 1000)` half away from zero,
/// computed over the digit string
fn parse_seconds(input: &str, number: &str) -> Result<i64> {
    let (whole, frac) = match number.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (number, ""),
    };
    let whole: i64 = whole
        .parse()
        .map_err(|_| Error::from(RangeError::new("seconds", number, "within the i64 range")))?;
    let frac_millis = i64::from(crate::values::temporal::frac_to_millis(frac));
    mul(input, whole, MILLIS_PER_SECOND).and_then(|ms| add(input, ms, frac_millis))
}

fn add(input: &str, a: i64, b: i64) -> Result<i64> {
    a.checked_add(b)
        .ok_or_else(|| RangeError::new("duration", input, "within the i64 millisecond range").into())
}

fn mul(input: &str, a: i64, b: i64) -> Result<i64> {
    a.checked_mul(b)
        .ok_or_else(|| RangeError::new("duration", input, "within the i64 millisecond range").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dur(s: &str) -> Duration {
        Duration::parse(s).unwrap()
    }

    #[test]
    fn test_parse_components() {
        assert_eq!(dur("P1Y2M"), Duration::new(14, 0));
        assert_eq!(dur("P3D"), Duration::new(0, 3 * MILLIS_PER_DAY));
        assert_eq!(
            dur("P1DT2H3M4S"),
            Duration::new(
                0,
                MILLIS_PER_DAY + 2 * MILLIS_PER_HOUR + 3 * MILLIS_PER_MINUTE + 4_000
            )
        );
        assert_eq!(dur("PT1.5S"), Duration::new(0, 1_500));
        assert_eq!(dur("P0D"), Duration::new(0, 0));
    }

    #[test]
    fn test_negation() {
        assert_eq!(dur("-P1Y2M"), Duration::new(-14, 0));
        assert_eq!(dur("-P1DT1S"), Duration::new(0, -(MILLIS_PER_DAY + 1_000)));
    }

    #[test]
    fn test_fragment_order() {
        assert!(Duration::parse("P2M1Y").is_err());
        assert!(Duration::parse("P1Y1Y").is_err());
        assert!(Duration::parse("PT1S1H").is_err());
        assert!(Duration::parse("PT1M1M").is_err());
        // Month before T and minute after T are distinct stages
        assert_eq!(dur("P1MT1M"), Duration::new(1, MILLIS_PER_MINUTE));
    }

    #[test]
    fn test_empty_and_trailing() {
        assert!(Duration::parse("P").is_err());
        assert!(Duration::parse("-P").is_err());
        assert!(Duration::parse("P1DT").is_err());
        assert!(Duration::parse("PT").is_err());
        assert!(Duration::parse("P1Dx").is_err());
        assert!(Duration::parse("P1.5D").is_err());
        assert!(Duration::parse("1D").is_err());
        assert!(Duration::parse("PT1.S").is_err());
    }

    #[test]
    fn test_fraction_rounding() {
        // round(seconds * 1000), half away from zero
        assert_eq!(dur("PT0.0005S").milliseconds(), 1);
        assert_eq!(dur("PT0.0004S").milliseconds(), 0);
        assert_eq!(dur("PT1.2345S").milliseconds(), 1_235);
        assert_eq!(dur("-PT0.0005S").milliseconds(), -1);
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(dur("P0D").lexical(), "P0D");
        assert_eq!(dur("PT0S").lexical(), "P0D");
        assert_eq!(dur("PT1.5S").lexical(), "PT1.5S");
        assert_eq!(dur("-P1Y2M").lexical(), "-P1Y2M");
        assert_eq!(dur("P1Y2M3DT4H5M6.789S").lexical(), "P1Y2M3DT4H5M6.789S");
        // Months and hours carry into canonical units
        assert_eq!(dur("P14M").lexical(), "P1Y2M");
        assert_eq!(dur("PT25H").lexical(), "P1DT1H");
        assert_eq!(dur("PT0.5S").lexical(), "PT0.5S");
        assert_eq!(Duration::new(0, 1_050).lexical(), "PT1.05S");
    }

    #[test]
    fn test_overflow() {
        assert!(Duration::parse("P9223372036854775807D").is_err());
        assert!(Duration::parse("P99999999999999999999Y").is_err());
    }
}
