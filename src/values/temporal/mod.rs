//! XSD temporal value family
//!
//! One variant type per temporal primitive: `date`, `time`, `dateTime`,
//! `gYear`, `gYearMonth`, `gMonth`, `gMonthDay`, `gDay`. Each variant
//! except `dateTime` packs its fields into one `u32`/`u64` scalar; all of
//! them implement the shared [`Temporal`] contract, reporting fields that
//! are not applicable to the variant as absent rather than zero.
//!
//! The packed scalars share a low 14-bit timezone block: bit 0 is the
//! presence flag, bits 1..14 hold a signed minute offset in [-840, 840].
//! Fields specific to a variant sit above the block.

mod date;
mod datetime;
mod gregorian;
mod time;

pub use date::Date;
pub use datetime::DateTime;
pub use gregorian::{GDay, GMonth, GMonthDay, GYear, GYearMonth};
pub use time::Time;

use crate::bits;
use crate::error::{RangeError, Result};
use crate::values::decimal::Decimal;

/// Shared accessor contract over all temporal variants.
///
/// Fields that are not meaningful to a variant return `None`; absence is
/// a distinct observable state from zero.
pub trait Temporal {
    /// Year, if applicable to the variant
    fn year(&self) -> Option<i64> {
        None
    }

    /// Month (1..=12), if applicable
    fn month(&self) -> Option<u8> {
        None
    }

    /// Day of month (1..=31), if applicable
    fn day(&self) -> Option<u8> {
        None
    }

    /// Hour (0..=23), if applicable
    fn hour(&self) -> Option<u8> {
        None
    }

    /// Minute (0..=59), if applicable
    fn minute(&self) -> Option<u8> {
        None
    }

    /// Second as a decimal in [0, 60), if applicable
    fn second(&self) -> Option<Decimal> {
        None
    }

    /// Timezone offset in minutes from UTC, or None when absent
    fn timezone_offset(&self) -> Option<i16>;

    /// Canonical lexical form
    fn lexical(&self) -> String;
}

// Timezone block layout, shared by every packed variant
pub(crate) const TZ_PRESENT_BIT: u32 = 0;
pub(crate) const TZ_OFFSET_BIT: u32 = 1;
pub(crate) const TZ_OFFSET_WIDTH: u32 = 13;
pub(crate) const FIELDS_BIT: u32 = 14;

/// Smallest timezone offset in minutes (-14:00)
pub const TZ_MIN_MINUTES: i32 = -840;
/// Largest timezone offset in minutes (+14:00)
pub const TZ_MAX_MINUTES: i32 = 840;

/// Pack an optional timezone offset into the low 14 bits of a word
pub(crate) fn pack_tz(word: u64, tz: Option<i32>) -> u64 {
    match tz {
        Some(minutes) => {
            let word = bits::insert(word, TZ_PRESENT_BIT, 1, 1);
            bits::insert_signed(word, TZ_OFFSET_BIT, TZ_OFFSET_WIDTH, i64::from(minutes))
        }
        None => bits::insert(word, TZ_PRESENT_BIT, 1, 0),
    }
}

/// Read the optional timezone offset back out of a packed word
pub(crate) fn unpack_tz(word: u64) -> Option<i16> {
    if bits::extract(word, TZ_PRESENT_BIT, 1) == 1 {
        Some(bits::extract_signed(word, TZ_OFFSET_BIT, TZ_OFFSET_WIDTH) as i16)
    } else {
        None
    }
}

// =============================================================================
// Range validation
// =============================================================================

/// Gregorian leap-year rule
pub fn is_leap_year(year: i64) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Greatest valid day for a month; February without a known year admits
/// 29 (the gMonthDay case)
pub fn max_day_in_month(month: u8, year: Option<i64>) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => match year {
            Some(y) if !is_leap_year(y) => 28,
            _ => 29,
        },
        _ => 0,
    }
}

pub(crate) fn check_month(month: u8) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(RangeError::new("month", month, "1 <= x <= 12").into());
    }
    Ok(())
}

pub(crate) fn check_day(day: u8, month: u8, year: Option<i64>) -> Result<()> {
    let max = max_day_in_month(month, year);
    if !(1..=max).contains(&day) {
        return Err(RangeError::new("day", day, format!("1 <= x <= {}", max)).into());
    }
    Ok(())
}

pub(crate) fn check_hour(hour: u8) -> Result<()> {
    if hour > 23 {
        return Err(RangeError::new("hour", hour, "0 <= x <= 23").into());
    }
    Ok(())
}

pub(crate) fn check_minute(minute: u8) -> Result<()> {
    if minute > 59 {
        return Err(RangeError::new("minute", minute, "0 <= x <= 59").into());
    }
    Ok(())
}

pub(crate) fn check_timezone(tz: Option<i32>) -> Result<()> {
    if let Some(minutes) = tz {
        if !(TZ_MIN_MINUTES..=TZ_MAX_MINUTES).contains(&minutes) {
            return Err(RangeError::new("timezone offset", minutes, "-840 <= x <= 840").into());
        }
    }
    Ok(())
}

/// Range-check a year against the signed bit width it will be packed into
pub(crate) fn check_year_width(year: i64, width: u32) -> Result<()> {
    let max = (1i64 << (width - 1)) - 1;
    let min = -(1i64 << (width - 1));
    if !(min..=max).contains(&year) {
        return Err(RangeError::new("year", year, format!("{} <= x <= {}", min, max)).into());
    }
    Ok(())
}

// =============================================================================
// Lexical fragments
// =============================================================================

/// Format a year: magnitude zero-padded to at least 4 digits, `-` prefix
/// when negative
pub(crate) fn fmt_year(year: i64) -> String {
    if year < 0 {
        format!("-{:04}", year.unsigned_abs())
    } else {
        format!("{:04}", year)
    }
}

/// Format a 2-digit zero-padded fragment
pub(crate) fn fmt2(value: u8) -> String {
    format!("{:02}", value)
}

/// Format an optional timezone: `Z` for offset 0, `±HH:MM` otherwise,
/// empty string when absent
pub(crate) fn fmt_tz(tz: Option<i16>) -> String {
    match tz {
        None => String::new(),
        Some(0) => "Z".to_string(),
        Some(minutes) => {
            let sign = if minutes < 0 { '-' } else { '+' };
            let magnitude = minutes.unsigned_abs();
            format!("{}{:02}:{:02}", sign, magnitude / 60, magnitude % 60)
        }
    }
}

/// Parse a captured timezone fragment (`Z` or `±HH:MM`), validating the
/// ±14:00 bound
pub(crate) fn parse_tz(capture: Option<&str>) -> Result<Option<i32>> {
    let text = match capture {
        None | Some("") => return Ok(None),
        Some("Z") => return Ok(Some(0)),
        Some(text) => text,
    };

    // Shape ±HH:MM is guaranteed by the callers' grammar match
    let sign = if text.starts_with('-') { -1 } else { 1 };
    let hours: i32 = text[1..3].parse().expect("two digits");
    let minutes: i32 = text[4..6].parse().expect("two digits");

    if minutes > 59 {
        return Err(RangeError::new("timezone minute", minutes, "0 <= x <= 59").into());
    }
    let total = sign * (hours * 60 + minutes);
    check_timezone(Some(total))?;
    Ok(Some(total))
}

/// Parse a captured year fragment, rejecting leading zeros on years of
/// more than four digits
pub(crate) fn parse_year(text: &str) -> Result<i64> {
    let magnitude = text.strip_prefix('-').unwrap_or(text);
    if magnitude.len() > 4 && magnitude.starts_with('0') {
        return Err(crate::error::GrammarError::new(
            "year of more than four digits must not have leading zeros",
        )
        .with_lexical(text)
        .into());
    }
    text.parse().map_err(|_| {
        RangeError::new("year", text, "within the representable year range").into()
    })
}

/// Round a fraction-digit string to milliseconds, half away from zero
pub(crate) fn frac_to_millis(frac_digits: &str) -> u32 {
    let mut millis = 0u32;
    for i in 0..3 {
        let digit = frac_digits
            .as_bytes()
            .get(i)
            .map(|b| u32::from(b - b'0'))
            .unwrap_or(0);
        millis = millis * 10 + digit;
    }
    let round_up = frac_digits
        .as_bytes()
        .get(3)
        .map(|b| *b >= b'5')
        .unwrap_or(false);
    millis + u32::from(round_up)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tz_pack_round_trip() {
        assert_eq!(unpack_tz(pack_tz(0, None)), None);
        assert_eq!(unpack_tz(pack_tz(0, Some(0))), Some(0));
        assert_eq!(unpack_tz(pack_tz(0, Some(-840))), Some(-840));
        assert_eq!(unpack_tz(pack_tz(0, Some(840))), Some(840));
        assert_eq!(unpack_tz(pack_tz(0, Some(330))), Some(330));
    }

    #[test]
    fn test_leap_year() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_max_day_in_month() {
        assert_eq!(max_day_in_month(1, None), 31);
        assert_eq!(max_day_in_month(4, None), 30);
        assert_eq!(max_day_in_month(2, Some(2024)), 29);
        assert_eq!(max_day_in_month(2, Some(2023)), 28);
        assert_eq!(max_day_in_month(2, None), 29);
    }

    #[test]
    fn test_check_timezone() {
        assert!(check_timezone(None).is_ok());
        assert!(check_timezone(Some(840)).is_ok());
        assert!(check_timezone(Some(-840)).is_ok());
        assert!(check_timezone(Some(841)).is_err());
        assert!(check_timezone(Some(-841)).is_err());
    }

    #[test]
    fn test_fmt_year() {
        assert_eq!(fmt_year(2024), "2024");
        assert_eq!(fmt_year(42), "0042");
        assert_eq!(fmt_year(-42), "-0042");
        assert_eq!(fmt_year(12345), "12345");
    }

    #[test]
    fn test_fmt_tz() {
        assert_eq!(fmt_tz(None), "");
        assert_eq!(fmt_tz(Some(0)), "Z");
        assert_eq!(fmt_tz(Some(330)), "+05:30");
        assert_eq!(fmt_tz(Some(-300)), "-05:00");
        assert_eq!(fmt_tz(Some(-840)), "-14:00");
    }

    #[test]
    fn test_parse_tz() {
        assert_eq!(parse_tz(None).unwrap(), None);
        assert_eq!(parse_tz(Some("Z")).unwrap(), Some(0));
        assert_eq!(parse_tz(Some("+05:30")).unwrap(), Some(330));
        assert_eq!(parse_tz(Some("-14:00")).unwrap(), Some(-840));
        assert!(parse_tz(Some("+14:01")).is_err());
        assert!(parse_tz(Some("-15:00")).is_err());
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2024").unwrap(), 2024);
        assert_eq!(parse_year("-0042").unwrap(), -42);
        assert_eq!(parse_year("12345").unwrap(), 12345);
        assert!(parse_year("012345").is_err());
    }

    #[test]
    fn test_frac_to_millis() {
        assert_eq!(frac_to_millis("5"), 500);
        assert_eq!(frac_to_millis("05"), 50);
        assert_eq!(frac_to_millis("123"), 123);
        assert_eq!(frac_to_millis("1234"), 123);
        assert_eq!(frac_to_millis("1235"), 124);
        assert_eq!(frac_to_millis("0005"), 1);
        assert_eq!(frac_to_millis("9995"), 1000);
    }
}
