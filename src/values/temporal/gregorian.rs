//! Recurring Gregorian fragments: gYear, gYearMonth, gMonth, gMonthDay, gDay
//!
//! Each variant packs into a single scalar: the shared 14-bit timezone
//! block in the low bits, the variant's own fields above it.

use super::{
    check_day, check_month, check_timezone, check_year_width, fmt2, fmt_tz, fmt_year, pack_tz,
    parse_tz, parse_year, unpack_tz, Temporal, FIELDS_BIT,
};
use crate::bits;
use crate::error::{GrammarError, RangeError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static GDAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^---(\d{2})(Z|[+-]\d{2}:\d{2})?$").unwrap());
static GMONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--(\d{2})(Z|[+-]\d{2}:\d{2})?$").unwrap());
static GYEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{4,})(Z|[+-]\d{2}:\d{2})?$").unwrap());
static GMONTH_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--(\d{2})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").unwrap());
static GYEAR_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(-?\d{4,})-(\d{2})(Z|[+-]\d{2}:\d{2})?$").unwrap());

fn grammar_error(value: &str, production: &str) -> crate::error::Error {
    GrammarError::new(format!("value is not a valid {}", production))
        .with_lexical(value)
        .with_production(production)
        .into()
}

// =============================================================================
// gDay
// =============================================================================

/// An XSD gDay value (`---DD` with optional timezone), packed as
/// day(6) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GDay(u32);

impl GDay {
    const DAY_BIT: u32 = FIELDS_BIT;
    const DAY_WIDTH: u32 = 6;

    /// Construct from components
    pub fn new(day: u8, tz: Option<i32>) -> Result<Self> {
        if !(1..=31).contains(&day) {
            return Err(RangeError::new("day", day, "1 <= x <= 31").into());
        }
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::DAY_BIT, Self::DAY_WIDTH, u64::from(day));
        Ok(Self(word as u32))
    }

    /// Parse the lexical form `---DD[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = GDAY
            .captures(value.trim())
            .ok_or_else(|| grammar_error(value, "xs:gDay"))?;
        let day = caps[1].parse::<u8>().expect("two digits");
        let tz = parse_tz(caps.get(2).map(|m| m.as_str()))?;
        Self::new(day, tz)
    }
}

impl Temporal for GDay {
    fn day(&self) -> Option<u8> {
        Some(bits::extract(u64::from(self.0), Self::DAY_BIT, Self::DAY_WIDTH) as u8)
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(u64::from(self.0))
    }

    fn lexical(&self) -> String {
        format!(
            "---{}{}",
            fmt2(self.day().expect("gDay always has a day")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for GDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// gMonth
// =============================================================================

/// An XSD gMonth value (`--MM` with optional timezone), packed as
/// month(5) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GMonth(u32);

impl GMonth {
    const MONTH_BIT: u32 = FIELDS_BIT;
    const MONTH_WIDTH: u32 = 5;

    /// Construct from components
    pub fn new(month: u8, tz: Option<i32>) -> Result<Self> {
        check_month(month)?;
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::MONTH_BIT, Self::MONTH_WIDTH, u64::from(month));
        Ok(Self(word as u32))
    }

    /// Parse the lexical form `--MM[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = GMONTH
            .captures(value.trim())
            .ok_or_else(|| grammar_error(value, "xs:gMonth"))?;
        let month = caps[1].parse::<u8>().expect("two digits");
        let tz = parse_tz(caps.get(2).map(|m| m.as_str()))?;
        Self::new(month, tz)
    }
}

impl Temporal for GMonth {
    fn month(&self) -> Option<u8> {
        Some(bits::extract(u64::from(self.0), Self::MONTH_BIT, Self::MONTH_WIDTH) as u8)
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(u64::from(self.0))
    }

    fn lexical(&self) -> String {
        format!(
            "--{}{}",
            fmt2(self.month().expect("gMonth always has a month")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for GMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// gYear
// =============================================================================

/// An XSD gYear value (`YYYY` with optional timezone), packed as
/// year(18, signed) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GYear(u32);

impl GYear {
    const YEAR_BIT: u32 = FIELDS_BIT;
    const YEAR_WIDTH: u32 = 18;

    /// Construct from components
    pub fn new(year: i64, tz: Option<i32>) -> Result<Self> {
        check_year_width(year, Self::YEAR_WIDTH)?;
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert_signed(word, Self::YEAR_BIT, Self::YEAR_WIDTH, year);
        Ok(Self(word as u32))
    }

    /// Parse the lexical form `[-]YYYY[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = GYEAR
            .captures(value.trim())
            .ok_or_else(|| grammar_error(value, "xs:gYear"))?;
        let year = parse_year(&caps[1])?;
        let tz = parse_tz(caps.get(2).map(|m| m.as_str()))?;
        Self::new(year, tz)
    }
}

impl Temporal for GYear {
    fn year(&self) -> Option<i64> {
        Some(bits::extract_signed(
            u64::from(self.0),
            Self::YEAR_BIT,
            Self::YEAR_WIDTH,
        ))
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(u64::from(self.0))
    }

    fn lexical(&self) -> String {
        format!(
            "{}{}",
            fmt_year(self.year().expect("gYear always has a year")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for GYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// gMonthDay
// =============================================================================

/// An XSD gMonthDay value (`--MM-DD` with optional timezone), packed as
/// day(5) + month(4) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GMonthDay(u32);

impl GMonthDay {
    const DAY_BIT: u32 = FIELDS_BIT;
    const DAY_WIDTH: u32 = 5;
    const MONTH_BIT: u32 = Self::DAY_BIT + Self::DAY_WIDTH;
    const MONTH_WIDTH: u32 = 4;

    /// Construct from components.
    ///
    /// With no year in play, February admits day 29.
    pub fn new(month: u8, day: u8, tz: Option<i32>) -> Result<Self> {
        check_month(month)?;
        check_day(day, month, None)?;
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::DAY_BIT, Self::DAY_WIDTH, u64::from(day));
        let word = bits::insert(word, Self::MONTH_BIT, Self::MONTH_WIDTH, u64::from(month));
        Ok(Self(word as u32))
    }

    /// Parse the lexical form `--MM-DD[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = GMONTH_DAY
            .captures(value.trim())
            .ok_or_else(|| grammar_error(value, "xs:gMonthDay"))?;
        let month = caps[1].parse::<u8>().expect("two digits");
        let day = caps[2].parse::<u8>().expect("two digits");
        let tz = parse_tz(caps.get(3).map(|m| m.as_str()))?;
        Self::new(month, day, tz)
    }
}

impl Temporal for GMonthDay {
    fn month(&self) -> Option<u8> {
        Some(bits::extract(u64::from(self.0), Self::MONTH_BIT, Self::MONTH_WIDTH) as u8)
    }

    fn day(&self) -> Option<u8> {
        Some(bits::extract(u64::from(self.0), Self::DAY_BIT, Self::DAY_WIDTH) as u8)
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(u64::from(self.0))
    }

    fn lexical(&self) -> String {
        format!(
            "--{}-{}{}",
            fmt2(self.month().expect("gMonthDay always has a month")),
            fmt2(self.day().expect("gMonthDay always has a day")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for GMonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// gYearMonth
// =============================================================================

/// An XSD gYearMonth value (`YYYY-MM` with optional timezone), packed as
/// month(4) + year(46, signed) above the timezone block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GYearMonth(u64);

impl GYearMonth {
    const MONTH_BIT: u32 = FIELDS_BIT;
    const MONTH_WIDTH: u32 = 4;
    const YEAR_BIT: u32 = Self::MONTH_BIT + Self::MONTH_WIDTH;
    const YEAR_WIDTH: u32 = 46;

    /// Construct from components
    pub fn new(year: i64, month: u8, tz: Option<i32>) -> Result<Self> {
        check_year_width(year, Self::YEAR_WIDTH)?;
        check_month(month)?;
        check_timezone(tz)?;
        let word = pack_tz(0, tz);
        let word = bits::insert(word, Self::MONTH_BIT, Self::MONTH_WIDTH, u64::from(month));
        let word = bits::insert_signed(word, Self::YEAR_BIT, Self::YEAR_WIDTH, year);
        Ok(Self(word))
    }

    /// Parse the lexical form `[-]YYYY-MM[tz]`
    pub fn parse(value: &str) -> Result<Self> {
        let caps = GYEAR_MONTH
            .captures(value.trim())
            .ok_or_else(|| grammar_error(value, "xs:gYearMonth"))?;
        let year = parse_year(&caps[1])?;
        let month = caps[2].parse::<u8>().expect("two digits");
        let tz = parse_tz(caps.get(3).map(|m| m.as_str()))?;
        Self::new(year, month, tz)
    }
}

impl Temporal for GYearMonth {
    fn year(&self) -> Option<i64> {
        Some(bits::extract_signed(self.0, Self::YEAR_BIT, Self::YEAR_WIDTH))
    }

    fn month(&self) -> Option<u8> {
        Some(bits::extract(self.0, Self::MONTH_BIT, Self::MONTH_WIDTH) as u8)
    }

    fn timezone_offset(&self) -> Option<i16> {
        unpack_tz(self.0)
    }

    fn lexical(&self) -> String {
        format!(
            "{}-{}{}",
            fmt_year(self.year().expect("gYearMonth always has a year")),
            fmt2(self.month().expect("gYearMonth always has a month")),
            fmt_tz(self.timezone_offset())
        )
    }
}

impl fmt::Display for GYearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}
