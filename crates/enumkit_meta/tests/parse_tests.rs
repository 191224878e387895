//! Parsing and formatting round trips across kinds.

#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

use enumkit_meta::{enum_type, EnumError, EnumFormat, FormatSpec, ParseOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

enum_type! {
    pub struct Letter: u8 {
        const A = 0x0A;
        const B = 0x0B;
        const Alpha = 0x0A;
    }
}

enum_type! {
    pub struct Level: i16 {
        const Low = -100;
        const Zero = 0;
        const High = 100;
    }
}

enum_type! {
    #[flags]
    pub struct Bits: u64 {
        const Low = 1;
        const High = 1 << 63;
        const Middle = 0xFF00;
    }
}

enum_type! {
    pub struct Wide: i64 {
        const Min = i64::MIN;
        const Max = i64::MAX;
    }
}

// -- Case sensitivity --

#[test]
fn ignore_case_resolves_names() {
    let info = Letter::info();
    assert_eq!(info.parse("a", &ParseOptions::with_ignore_case(true)), Ok(Letter::A));
    let err = info.parse("a", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, EnumError::Format { .. }), "{err:?}");
}

#[test]
fn exact_match_wins_over_folded() {
    enum_type! {
        struct Pair: u8 {
            const x = 1;
            const X = 2;
        }
    }
    let info = Pair::info();
    let folded = ParseOptions::with_ignore_case(true);
    assert_eq!(info.parse("X", &folded), Ok(Pair(2)));
    assert_eq!(info.parse("x", &folded), Ok(Pair(1)));
}

// -- Numbers --

#[test]
fn numeric_segments() {
    let info = Level::info();
    let options = ParseOptions::default();
    assert_eq!(info.parse("-100", &options), Ok(Level::Low));
    assert_eq!(info.parse("7", &options), Ok(Level(7)));
    assert!(info.parse("40000", &options).unwrap_err().is_overflow());
    assert!(info.parse("4e2", &options).unwrap_err().is_format());
    assert!(info.parse("", &options).unwrap_err().is_format());
}

#[test]
fn negative_text_for_unsigned_kinds() {
    let info = Letter::info();
    let options = ParseOptions::default();
    assert!(info.parse("-1", &options).unwrap_err().is_overflow());
    assert!(info.parse("256", &options).unwrap_err().is_overflow());
    assert_eq!(info.parse("-0", &options), Ok(Letter(0)));
    assert!(info.to_object("-1", false).unwrap_err().is_overflow());
    assert_eq!(info.to_object("-0", false), Ok(Letter(0)));
    assert!(Bits::info().parse("-1", &options).unwrap_err().is_overflow());
}

#[test]
fn hex_segments() {
    let info = Level::info();
    let hex = ParseOptions::with_format_order([EnumFormat::Hexadecimal]);
    assert_eq!(info.parse("FF9C", &hex), Ok(Level::Low));
    assert_eq!(info.format(Level::Low, "X").unwrap(), "FF9C");
    assert!(info.parse("1FFFF", &hex).unwrap_err().is_overflow());
}

#[test]
fn parse_member_requires_definition() {
    let info = Letter::info();
    let options = ParseOptions::default();
    let member = info.parse_member("Alpha", &options).unwrap();
    assert_eq!(member.name(), "Alpha");
    assert_eq!(member.value(), Letter::A);
    assert_eq!(info.parse_member("10", &options).unwrap().name(), "A");
    assert!(info.parse_member("12", &options).is_err());
    assert!(info.try_parse_member("A, B", &options).is_none());
}

#[test]
fn format_tokens() {
    let info = Wide::info();
    assert_eq!(info.format(Wide::Min, "D").unwrap(), "-9223372036854775808");
    assert_eq!(info.format(Wide::Min, "x").unwrap(), "8000000000000000");
    assert_eq!(info.format_spec(Wide(5), FormatSpec::General), "5");
    assert!(info.format(Wide::Max, "Y").unwrap_err().is_format());
    assert!(!info.is_contiguous());
}

#[test]
fn conversions_check_range() {
    let info = Wide::info();
    assert!(info.convert::<i32>(Wide::Max).unwrap_err().is_overflow());
    assert_eq!(info.convert::<u8>(Wide(200)), Ok(200));
    assert!(info.convert::<u64>(Wide::Min).is_err());
}

// -- Round trips --

proptest! {
    #[test]
    fn general_round_trip_i16(raw in any::<i16>()) {
        let info = Level::info();
        let text = info.as_string(Level(raw));
        prop_assert_eq!(info.parse(&text, &ParseOptions::default()), Ok(Level(raw)));
    }

    #[test]
    fn general_round_trip_flags_u64(raw in any::<u64>()) {
        let info = Bits::info();
        let text = info.as_string(Bits(raw));
        prop_assert_eq!(info.parse(&text, &ParseOptions::default()), Ok(Bits(raw)));
    }

    #[test]
    fn hex_is_two_upper_digits_for_u8(raw in any::<u8>()) {
        let text = Letter::info().format(Letter(raw), "X").unwrap();
        prop_assert_eq!(text.len(), 2);
        prop_assert!(text.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        prop_assert_eq!(u8::from_str_radix(&text, 16), Ok(raw));
    }

    #[test]
    fn coerced_integers_match_range(raw in any::<i64>()) {
        let info = Level::info();
        let coerced = info.to_object(raw, false);
        match i16::try_from(raw) {
            Ok(expected) => prop_assert_eq!(coerced, Ok(Level(expected))),
            Err(_) => prop_assert!(coerced.unwrap_err().is_overflow()),
        }
    }
}

#[test]
fn every_member_round_trips() {
    let info = Letter::info();
    for member in info.members(false) {
        let text = info.as_string(member.value());
        assert_eq!(info.parse(&text, &ParseOptions::default()), Ok(member.value()));
    }
}
