//! XSD date values

use super::{
    check_day, check_month, check_timezone, check_year_width, fmt2, fmt_tz, fmt_year, pack_tz,
    parse_tz, parse_year, unpack_tz, Temporal, FIELDS_BIT,
};
use crate::bits;
use crate::error::{GrammarError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{4,})-(\d{2})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").unwrap());

/// An XSD date value (`YYYY-MM-DD` with optional timezone), packed as
/// day(5) + month(4) + year(41, signed) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Date(u64);

impl Date {
    const DAY_BIT: u32 = FIELDS_BIT;
    const DAY_WIDTH: u32 = 5;
    const MONTH_BIT: u32 = Self::DAY_BIT + Self::DAY_WIDTH;
    const MONTH_WIDTH: u32 = 4;
    const YEAR_BIT: u32 = Self::MONTH_BIT + Self::MONTH_WIDTH;
    const YEAR_WIDTH: u32 = 41;

    /// Construct from components, validating the day against the month
    /// and the Gregorian leap-year rule
    pub fn new(year: i64, month: u8, day: u8, tz: Option<i32>) -> Result<Self> {
        check_year_width(year, Self::YEAR_WIDTH)?;
        check_month(month)?;
        check_day(day, month, Some(year))?;
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::DAY_BIT, Self::DAY_WIDTH, u64::from(day));
        let word = bits::insert(word, Self::MONTH_BIT, Self::MONTH_WIDTH, u64::from(month));
        let word = bits::insert_signed(word, Self::YEAR_BIT, Self::YEAR_WIDTH, year);
        Ok(Self(word))
    }

    /// Parse the lexical form `[-]YYYY-MM-DD[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = DATE.captures(value.trim()).ok_or_else(|| {
            GrammarError::new("value is not a valid xs:date")
                .with_lexical(value)
                .with_production("YYYY-MM-DD")
        })?;
        let year = parse_year(&caps[1])?;
        let month = caps[2].parse::<u8>().expect("two digits");
        let day = caps[3].parse::<u8>().expect("two digits");
        let tz = parse_tz(caps.get(4).map(|m| m.as_str()))?;
        Self::new(year, month, day, tz)
    }
}

impl Temporal for Date {
    fn year(&self) -> Option<i64> {
        Some(bits::extract_signed(self.0, Self::YEAR_BIT, Self::YEAR_WIDTH))
    }

    fn month(&self) -> Option<u8> {
        Some(bits::extract(self.0, Self::MONTH_BIT, Self::MONTH_WIDTH) as u8)
    }

    fn day(&self) -> Option<u8> {
        Some(bits::extract(self.0, Self::DAY_BIT, Self::DAY_WIDTH) as u8)
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(self.0)
    }

    fn lexical(&self) -> String {
        format!(
            "{}-{}-{}{}",
            fmt_year(self.year().expect("date always has a year")),
            fmt2(self.month().expect("date always has a month")),
            fmt2(self.day().expect("date always has a day")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_accessors() {
        let d = Date::parse("2024-02-29").unwrap();
        assert_eq!(d.year(), Some(2024));
        assert_eq!(d.month(), Some(2));
        assert_eq!(d.day(), Some(29));
        assert_eq!(d.hour(), None);
        assert_eq!(d.timezone_offset(), None);
        assert_eq!(d.lexical(), "2024-02-29");
    }

    #[test]
    fn test_leap_year_enforcement() {
        assert!(Date::parse("2000-02-29").is_ok());
        assert!(Date::parse("2024-02-29").is_ok());
        assert!(Date::parse("1900-02-29").is_err());
        assert!(Date::parse("2023-02-29").is_err());
        // February 30 fails for every year
        assert!(Date::parse("2024-02-30").is_err());
        assert!(Date::new(2000, 2, 30, None).is_err());
    }

    #[test]
    fn test_timezone_forms() {
        assert_eq!(Date::parse("2024-01-15Z").unwrap().timezone_offset(), Some(0));
        assert_eq!(
            Date::parse("2024-01-15+05:30").unwrap().timezone_offset(),
            Some(330)
        );
        assert_eq!(
            Date::parse("2024-01-15-14:00").unwrap().timezone_offset(),
            Some(-840)
        );
        assert!(Date::parse("2024-01-15+14:01").is_err());
    }

    #[test]
    fn test_negative_year() {
        let d = Date::parse("-0753-04-21").unwrap();
        assert_eq!(d.year(), Some(-753));
        assert_eq!(d.lexical(), "-0753-04-21");
    }

    #[test]
    fn test_construction_matches_parse() {
        let built = Date::new(2024, 1, 15, Some(330)).unwrap();
        let parsed = Date::parse("2024-01-15+05:30").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn test_grammar_errors() {
        assert!(Date::parse("2024-1-15").is_err());
        assert!(Date::parse("2024/01/15").is_err());
        assert!(Date::parse("2024-01").is_err());
        assert!(Date::parse("2024-01-15T00:00:00").is_err());
    }
}
