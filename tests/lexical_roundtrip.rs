//! Cross-type lexical round-trip and ordering tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::cmp::Ordering;
use xsdvalue::namespaces::QNameMap;
use xsdvalue::values::{
    parse_builtin, Date, Decimal, Duration, Temporal, Time, Uri,
};

#[test]
fn decimal_round_trip_preserves_spelling() {
    for s in ["1.50", "1.5", "-0.001", "007", "+42"] {
        let d = Decimal::parse(s).unwrap();
        assert_eq!(d.lexical(), s);
    }
}

#[test]
fn decimal_total_order() {
    let cmp = |a: &str, b: &str| Decimal::parse(a).unwrap().compare(&Decimal::parse(b).unwrap());
    assert_eq!(cmp("1.50", "1.5"), Ordering::Equal);
    assert_eq!(cmp("-2", "1"), Ordering::Less);
    assert_eq!(cmp("100", "99"), Ordering::Greater);
}

#[test]
fn temporal_range_enforcement() {
    // February 30 fails for every year
    for year in ["1999", "2000", "2023", "2024"] {
        assert!(parse_builtin("date", &format!("{}-02-30", year)).is_err());
    }
    // February 29 succeeds iff the year is a leap year
    assert!(parse_builtin("date", "2000-02-29").is_ok());
    assert!(parse_builtin("date", "2024-02-29").is_ok());
    assert!(parse_builtin("date", "1900-02-29").is_err());
    assert!(parse_builtin("date", "2023-02-29").is_err());
}

#[test]
fn timezone_bounds() {
    assert!(Date::new(2024, 1, 1, Some(840)).is_ok());
    assert!(Date::new(2024, 1, 1, Some(-840)).is_ok());
    assert!(Date::new(2024, 1, 1, Some(841)).is_err());
    assert!(Date::new(2024, 1, 1, Some(-841)).is_err());
}

#[test]
fn duration_canonicalization() {
    assert_eq!(Duration::parse("P0D").unwrap().lexical(), "P0D");
    assert_eq!(Duration::parse("PT1.5S").unwrap().lexical(), "PT1.5S");

    let d = Duration::parse("-P1Y2M").unwrap();
    assert_eq!(d.months(), -14);
    assert_eq!(d.milliseconds(), 0);
    assert_eq!(d.lexical(), "-P1Y2M");
}

#[test]
fn uri_component_isolation() {
    let uri = Uri::parse("https://a.example/p?q=1#f").unwrap();
    assert_eq!(uri.scheme(), Some("https"));
    assert_eq!(uri.authority(), Some("a.example"));
    assert_eq!(uri.path(), "/p");
    assert_eq!(uri.query(), Some("q=1"));
    assert_eq!(uri.fragment(), Some("f"));
    assert_eq!(uri.lexical(), "https://a.example/p?q=1#f");

    // Unescaped space in the path
    assert!(Uri::parse("a b").is_err());
}

#[test]
fn qname_map_ordering() {
    let mut map = QNameMap::new();
    map.put(Some("ns1"), "a", 1);
    map.put(Some("ns1"), "b", 2);
    map.put(Some("ns2"), "a", 3);
    map.remove(Some("ns2"), "a");

    let keys: Vec<_> = map
        .keys()
        .map(|k| (k.namespace.clone().unwrap(), k.local_name.clone()))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("ns1".to_string(), "a".to_string()),
            ("ns1".to_string(), "b".to_string()),
        ]
    );

    // Re-putting updates the value but keeps the position
    map.put(Some("ns1"), "a", 10);
    assert_eq!(map.get(Some("ns1"), "a"), Some(&10));
    assert_eq!(map.keys().next().unwrap().local_name, "a");
}

#[test]
fn registry_round_trips() {
    for (type_name, value) in [
        ("dateTime", "2024-01-15T10:30:05.5+05:30"),
        ("time", "23:59:59.999Z"),
        ("date", "-0044-03-15"),
        ("gYearMonth", "2024-02Z"),
        ("gYear", "-0042"),
        ("gMonthDay", "--02-29"),
        ("gDay", "---31"),
        ("gMonth", "--12+14:00"),
        ("duration", "P1Y2M3DT4H5M6.789S"),
        ("decimal", "1.50"),
        ("nonNegativeInteger", "18446744073709551616"),
        ("anyURI", "https://a.example/p?q=1#f"),
        ("boolean", "true"),
        ("float", "-INF"),
    ] {
        let parsed = parse_builtin(type_name, value)
            .unwrap_or_else(|e| panic!("{} '{}' failed: {}", type_name, value, e));
        assert_eq!(parsed.lexical(), value, "round trip of {} '{}'", type_name, value);
    }
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_decimal_round_trip(s in "[+-]?[0-9]{1,30}(\\.[0-9]{1,30})?") {
        let d = Decimal::parse(&s).unwrap();
        prop_assert_eq!(d.lexical(), s.as_str());
    }

    #[test]
    fn prop_decimal_antisymmetry(
        a in "[+-]?[0-9]{1,25}(\\.[0-9]{1,25})?",
        b in "[+-]?[0-9]{1,25}(\\.[0-9]{1,25})?",
    ) {
        let a = Decimal::parse(&a).unwrap();
        let b = Decimal::parse(&b).unwrap();
        prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
    }

    #[test]
    fn prop_decimal_padding_equivalence(
        s in "[+-]?[0-9]{1,20}\\.[0-9]{1,20}",
        zeros in 1usize..5,
    ) {
        // Trailing fraction zeros never change the compared value
        let padded = format!("{}{}", s, "0".repeat(zeros));
        let a = Decimal::parse(&s).unwrap();
        let b = Decimal::parse(&padded).unwrap();
        prop_assert_eq!(a.compare(&b), Ordering::Equal);
    }

    #[test]
    fn prop_date_construction_round_trip(
        year in -9999i64..=9999,
        month in 1u8..=12,
        day_seed in 0u8..31,
        tz in prop::option::of(-840i32..=840),
    ) {
        let day = 1 + day_seed % xsdvalue::values::temporal::max_day_in_month(month, Some(year));
        let date = Date::new(year, month, day, tz).unwrap();
        let reparsed = Date::parse(&date.lexical()).unwrap();
        prop_assert_eq!(date, reparsed);
    }

    #[test]
    fn prop_time_construction_round_trip(
        hour in 0u8..=23,
        minute in 0u8..=59,
        millis in 0u32..60_000,
        tz in prop::option::of(-840i32..=840),
    ) {
        let time = Time::new(hour, minute, millis, tz).unwrap();
        let reparsed = Time::parse(&time.lexical()).unwrap();
        prop_assert_eq!(time, reparsed);
    }

    #[test]
    fn prop_duration_canonical_round_trip(
        negative: bool,
        months in 0i64..100_000,
        millis in 0i64..10_000_000_000,
    ) {
        let sign = if negative { -1 } else { 1 };
        let duration = Duration::new(sign * months, sign * millis);
        let reparsed = Duration::parse(&duration.lexical()).unwrap();
        prop_assert_eq!(duration, reparsed);
    }
}
