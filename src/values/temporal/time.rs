//! XSD time values

use super::{
    check_hour, check_minute, check_timezone, fmt2, fmt_tz, frac_to_millis, pack_tz, parse_tz,
    unpack_tz, Temporal, FIELDS_BIT,
};
use crate::bits;
use crate::error::{GrammarError, RangeError, Result};
use crate::values::decimal::Decimal;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static TIME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})(\.\d+)?(Z|[+-]\d{2}:\d{2})?$").unwrap());

/// An XSD time value (`HH:MM:SS[.fff]` with optional timezone), packed as
/// hour(5) + minute(6) + millisecond-of-minute(16) above the timezone
/// block. Sub-millisecond fraction digits round to the nearest
/// millisecond on parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time(u64);

impl Time {
    const HOUR_BIT: u32 = FIELDS_BIT;
    const HOUR_WIDTH: u32 = 5;
    const MINUTE_BIT: u32 = Self::HOUR_BIT + Self::HOUR_WIDTH;
    const MINUTE_WIDTH: u32 = 6;
    const MILLIS_BIT: u32 = Self::MINUTE_BIT + Self::MINUTE_WIDTH;
    const MILLIS_WIDTH: u32 = 16;

    /// Construct from components; `millis` is the millisecond-of-minute
    /// in [0, 60000)
    pub fn new(hour: u8, minute: u8, millis: u32, tz: Option<i32>) -> Result<Self> {
        check_hour(hour)?;
        check_minute(minute)?;
        if millis >= 60_000 {
            return Err(RangeError::new("second", millis as f64 / 1000.0, "0 <= x < 60").into());
        }
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::HOUR_BIT, Self::HOUR_WIDTH, u64::from(hour));
        let word = bits::insert(word, Self::MINUTE_BIT, Self::MINUTE_WIDTH, u64::from(minute));
        let word = bits::insert(word, Self::MILLIS_BIT, Self::MILLIS_WIDTH, u64::from(millis));
        Ok(Self(word))
    }

    /// Parse the lexical form `HH:MM:SS[.fff][tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = TIME.captures(value.trim()).ok_or_else(|| {
            GrammarError::new("value is not a valid xs:time")
                .with_lexical(value)
                .with_production("HH:MM:SS[.fff]")
        })?;
        let hour = caps[1].parse::<u8>().expect("two digits");
        let minute = caps[2].parse::<u8>().expect("two digits");
        let seconds = caps[3].parse::<u32>().expect("two digits");
        if seconds > 59 {
            return Err(RangeError::new("second", seconds, "0 <= x < 60").into());
        }
        let frac = caps.get(4).map(|m| &m.as_str()[1..]).unwrap_or("");
        let millis = seconds * 1000 + frac_to_millis(frac);
        let tz = parse_tz(caps.get(5).map(|m| m.as_str()))?;
        Self::new(hour, minute, millis, tz)
    }

    /// Millisecond-of-minute in [0, 60000)
    pub fn millisecond_of_minute(&self) -> u32 {
        bits::extract(self.0, Self::MILLIS_BIT, Self::MILLIS_WIDTH) as u32
    }
}

impl Temporal for Time {
    fn hour(&self) -> Option<u8> {
        Some(bits::extract(self.0, Self::HOUR_BIT, Self::HOUR_WIDTH) as u8)
    }

    fn minute(&self) -> Option<u8> {
        Some(bits::extract(self.0, Self::MINUTE_BIT, Self::MINUTE_WIDTH) as u8)
    }

    fn second(&self) -> Option<Decimal> {
        Some(
            Decimal::parse(&fmt_seconds(self.millisecond_of_minute()))
                .expect("formatted seconds are valid decimal"),
        )
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(self.0)
    }

    fn lexical(&self) -> String {
        format!(
            "{}:{}:{}{}",
            fmt2(self.hour().expect("time always has an hour")),
            fmt2(self.minute().expect("time always has a minute")),
            fmt_seconds_padded(self.millisecond_of_minute()),
            fmt_tz(self.timezone_offset())
        )
    }
}

/// Seconds as a plain decimal string, e.g. `5` or `5.25`
fn fmt_seconds(millis: u32) -> String {
    let whole = millis / 1000;
    let frac = millis % 1000;
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{}.{}", whole, trim_frac(frac))
    }
}

/// Seconds zero-padded to two integer digits, e.g. `05` or `05.25`
fn fmt_seconds_padded(millis: u32) -> String {
    let whole = millis / 1000;
    let frac = millis % 1000;
    if frac == 0 {
        fmt2(whole as u8)
    } else {
        format!("{:02}.{}", whole, trim_frac(frac))
    }
}

fn trim_frac(frac: u32) -> String {
    format!("{:03}", frac).trim_end_matches('0').to_string()
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let t = Time::parse("10:30:05").unwrap();
        assert_eq!(t.hour(), Some(10));
        assert_eq!(t.minute(), Some(30));
        assert_eq!(t.millisecond_of_minute(), 5000);
        assert_eq!(t.second().unwrap(), Decimal::parse("5").unwrap());
        assert_eq!(t.year(), None);
        assert_eq!(t.day(), None);
        assert_eq!(t.lexical(), "10:30:05");
    }

    #[test]
    fn test_fractional_seconds() {
        let t = Time::parse("10:30:05.5").unwrap();
        assert_eq!(t.millisecond_of_minute(), 5500);
        assert_eq!(t.lexical(), "10:30:05.5");

        let t = Time::parse("00:00:00.125Z").unwrap();
        assert_eq!(t.millisecond_of_minute(), 125);
        assert_eq!(t.lexical(), "00:00:00.125Z");

        // Sub-millisecond digits round half away from zero
        let t = Time::parse("00:00:01.0005").unwrap();
        assert_eq!(t.millisecond_of_minute(), 1001);
    }

    #[test]
    fn test_range_enforcement() {
        assert!(Time::parse("24:00:00").is_err());
        assert!(Time::parse("10:60:00").is_err());
        assert!(Time::parse("10:00:60").is_err());
        assert!(Time::new(23, 59, 60_000, None).is_err());
        assert!(Time::new(23, 59, 59_999, None).is_ok());
    }

    #[test]
    fn test_timezone() {
        let t = Time::parse("10:30:00-08:00").unwrap();
        assert_eq!(t.timezone_offset(), Some(-480));
        assert_eq!(t.lexical(), "10:30:00-08:00");

        assert_eq!(Time::parse("10:30:00Z").unwrap().lexical(), "10:30:00Z");
        assert!(Time::parse("10:30:00+15:00").is_err());
    }

    #[test]
    fn test_construction_matches_parse() {
        let built = Time::new(10, 30, 5500, Some(0)).unwrap();
        let parsed = Time::parse("10:30:05.5Z").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_grammar_errors() {
        assert!(Time::parse("1:30:00").is_err());
        assert!(Time::parse("10:30").is_err());
        assert!(Time::parse("10-30-00").is_err());
        assert!(Time::parse("10:30:00.").is_err());
    }
}
