//! XSD dateTime values

use super::{
    check_day, check_hour, check_minute, check_month, check_timezone, fmt2, fmt_tz, fmt_year,
    parse_tz, parse_year, Temporal,
};
use crate::error::{GrammarError, RangeError, Result};
use crate::values::decimal::Decimal;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DATE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})T(\d{2}):(\d{2}):(\d{2}(\.\d+)?)(Z|[+-]\d{2}:\d{2})?$")
        .unwrap()
});

static SIXTY: Lazy<Decimal> = Lazy::new(|| Decimal::parse("60").expect("valid decimal"));

/// An XSD dateTime value (`YYYY-MM-DDTHH:MM:SS[.fff]` with optional
/// timezone).
///
/// Unlike the other temporal variants this one is composed from discrete
/// fields rather than a single packed scalar, because its second is a
/// decimal value, not an integer millisecond count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: Decimal,
    tz: Option<i16>,
}

impl DateTime {
    /// Construct from components, validating the day against the month
    /// and the Gregorian leap-year rule and the second against [0, 60)
    pub fn new(
        year: i64,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: Decimal,
        tz: Option<i32>,
    ) -> Result<Self> {
        check_month(month)?;
        check_day(day, month, Some(year))?;
        check_hour(hour)?;
        check_minute(minute)?;
        if second.is_negative() && !second.is_zero() || second >= *SIXTY {
            return Err(RangeError::new("second", second.lexical(), "0 <= x < 60").into());
        }
        check_timezone(tz)?;
        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            tz: tz.map(|minutes| minutes as i16),
        })
    }

    /// Parse the lexical form `[-]YYYY-MM-DDTHH:MM:SS[.fff][tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = DATE_TIME.captures(value.trim()).ok_or_else(|| {
            GrammarError::new("value is not a valid xs:dateTime")
                .with_lexical(value)
                .with_production("YYYY-MM-DDTHH:MM:SS[.fff]")
        })?;
        let year = parse_year(&caps[1])?;
        let month = caps[2].parse::<u8>().expect("two digits");
        let day = caps[3].parse::<u8>().expect("two digits");
        let hour = caps[4].parse::<u8>().expect("two digits");
        let minute = caps[5].parse::<u8>().expect("two digits");
        // Seconds keep their fraction digits verbatim
        let second = Decimal::parse(&caps[6])?;
        let tz = parse_tz(caps.get(8).map(|m| m.as_str()))?;
        Self::new(year, month, day, hour, minute, second, tz)
    }
}

impl Temporal for DateTime {
    fn year(&self) -> Option<i64> {
        Some(self.year)
    }

    fn month(&self) -> Option<u8> {
        Some(self.month)
    }

    fn day(&self) -> Option<u8> {
        Some(self.day)
    }

    fn hour(&self) -> Option<u8> {
        Some(self.hour)
    }

    fn minute(&self) -> Option<u8> {
        Some(self.minute)
    }

    fn second(&self) -> Option<Decimal> {
        Some(self.second.clone())
    }

    fn timezone_offset(&self) -> Option<i16> {
        self.tz
    }

    fn lexical(&self) -> String {
        format!(
            "{}-{}-{}T{}:{}:{}{}",
            fmt_year(self.year),
            fmt2(self.month),
            fmt2(self.day),
            fmt2(self.hour),
            fmt2(self.minute),
            fmt_second(&self.second),
            fmt_tz(self.tz)
        )
    }
}

/// Seconds with the integer part zero-padded to two digits and any
/// fraction digits preserved from the decimal's own lexical form
fn fmt_second(second: &Decimal) -> String {
    let lexical = second.lexical();
    let (int, frac) = match lexical.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (lexical, None),
    };
    let int: u32 = int.parse().expect("seconds integer part fits u32");
    match frac {
        Some(frac) => format!("{:02}.{}", int, frac),
        None => format!("{:02}", int),
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let dt = DateTime::parse("2024-01-15T10:30:05Z").unwrap();
        assert_eq!(dt.year(), Some(2024));
        assert_eq!(dt.month(), Some(1));
        assert_eq!(dt.day(), Some(15));
        assert_eq!(dt.hour(), Some(10));
        assert_eq!(dt.minute(), Some(30));
        assert_eq!(dt.second().unwrap(), Decimal::parse("5").unwrap());
        assert_eq!(dt.timezone_offset(), Some(0));
        assert_eq!(dt.lexical(), "2024-01-15T10:30:05Z");
    }

    #[test]
    fn test_fraction_digits_preserved() {
        let dt = DateTime::parse("2024-01-15T10:30:05.50").unwrap();
        assert_eq!(dt.lexical(), "2024-01-15T10:30:05.50");

        let dt = DateTime::parse("2024-01-15T10:30:05.5").unwrap();
        assert_eq!(dt.lexical(), "2024-01-15T10:30:05.5");
    }

    #[test]
    fn test_leap_year_enforcement() {
        assert!(DateTime::parse("2024-02-29T00:00:00").is_ok());
        assert!(DateTime::parse("2023-02-29T00:00:00").is_err());
        assert!(DateTime::parse("1900-02-29T00:00:00").is_err());
        assert!(DateTime::parse("2000-02-29T00:00:00").is_ok());
    }

    #[test]
    fn test_range_enforcement() {
        assert!(DateTime::parse("2024-13-01T00:00:00").is_err());
        assert!(DateTime::parse("2024-01-01T24:00:00").is_err());
        assert!(DateTime::parse("2024-01-01T00:61:00").is_err());
        assert!(DateTime::parse("2024-01-01T00:00:60").is_err());
        assert!(DateTime::parse("2024-01-01T00:00:00+15:00").is_err());

        let second = Decimal::parse("60.0").unwrap();
        assert!(DateTime::new(2024, 1, 1, 0, 0, second, None).is_err());
        let second = Decimal::parse("59.999").unwrap();
        assert!(DateTime::new(2024, 1, 1, 0, 0, second, None).is_ok());
    }

    #[test]
    fn test_negative_year() {
        let dt = DateTime::parse("-0044-03-15T12:00:00").unwrap();
        assert_eq!(dt.year(), Some(-44));
        assert_eq!(dt.lexical(), "-0044-03-15T12:00:00");
    }

    #[test]
    fn test_construction_matches_parse() {
        let second = Decimal::parse("05.5").unwrap();
        let built = DateTime::new(2024, 1, 15, 10, 30, second, Some(330)).unwrap();
        let parsed = DateTime::parse("2024-01-15T10:30:05.5+05:30").unwrap();
        assert_eq!(built, parsed);
        assert_eq!(built.lexical(), "2024-01-15T10:30:05.5+05:30");
    }

    #[test]
    fn test_grammar_errors() {
        assert!(DateTime::parse("2024-01-15 10:30:00").is_err());
        assert!(DateTime::parse("2024-01-15T10:30").is_err());
        assert!(DateTime::parse("2024-01-15").is_err());
        assert!(DateTime::parse("T10:30:00").is_err());
    }
}
