#![allow(
    clippy::unwrap_used,
    reason = "test code uses unwrap for concise assertions"
)]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn raw<T: Integral>(value: T) -> RawValue {
    value.to_raw()
}

#[test]
fn comparison_respects_signedness() {
    let signed = OperatorSet::of::<i8>();
    assert!(signed.greater_than(raw(1i8), raw(-1i8)));
    assert_eq!(signed.compare(raw(-128i8), raw(127i8)), Ordering::Less);

    let unsigned = OperatorSet::of::<u8>();
    assert!(unsigned.greater_than(raw(255u8), raw(1u8)));
    assert_eq!(unsigned.compare(raw(7u8), raw(7u8)), Ordering::Equal);
}

#[test]
fn bitwise_ops_stay_in_width() {
    let ops = OperatorSet::of::<u8>();
    assert_eq!(ops.not(raw(0u8)), raw(0xFFu8));
    assert_eq!(ops.and(raw(0b1100u8), raw(0b1010u8)), raw(0b1000u8));
    assert_eq!(ops.or(raw(0b1100u8), raw(0b1010u8)), raw(0b1110u8));
    assert_eq!(ops.xor(raw(0b1100u8), raw(0b1010u8)), raw(0b0110u8));

    let signed = OperatorSet::of::<i16>();
    assert_eq!(signed.not(raw(0i16)), raw(-1i16));
}

#[test]
fn power_of_two_test() {
    let ops = OperatorSet::of::<i32>();
    assert!(ops.is_power_of_two(raw(0i32)));
    assert!(ops.is_power_of_two(raw(1i32)));
    assert!(ops.is_power_of_two(raw(64i32)));
    assert!(!ops.is_power_of_two(raw(6i32)));
    assert!(ops.is_power_of_two(raw(i32::MIN)));
}

#[test]
fn truncating_conversions() {
    let ops = OperatorSet::of::<u8>();
    assert_eq!(ops.from_i64(-1), raw(255u8));
    assert_eq!(ops.from_u64(0x1_02), raw(2u8));
    assert!(!ops.u64_in_range(0x1_02));
}

#[test]
fn narrowing_reports_loss_as_none() {
    let ops = OperatorSet::of::<i32>();
    assert_eq!(ops.narrow::<i8>(raw(100i32)), Some(100i8));
    assert_eq!(ops.narrow::<i8>(raw(300i32)), None);
    assert_eq!(ops.narrow::<u64>(raw(-1i32)), None);
    assert_eq!(ops.narrow::<i64>(raw(-1i32)), Some(-1i64));
}

#[test]
fn native_round_trip() {
    let ops = OperatorSet::of::<u16>();
    assert_eq!(ops.to_native(raw(513u16)), NativeInt::U16(513));
}

#[test]
fn distance_across_the_full_range() {
    let ops = OperatorSet::of::<i64>();
    assert_eq!(ops.distance(raw(i64::MIN), raw(i64::MAX)), Some(u64::MAX));
    assert_eq!(ops.distance(raw(5i64), raw(2i64)), None);

    let unsigned = OperatorSet::of::<u64>();
    assert_eq!(unsigned.distance(raw(0u64), raw(u64::MAX)), Some(u64::MAX));
}

#[test]
fn hex_format_is_fixed_width_upper_case() {
    assert_eq!(OperatorSet::of::<u8>().format(raw(10u8), NumberStyle::Hexadecimal), "0A");
    assert_eq!(OperatorSet::of::<i8>().format(raw(-1i8), NumberStyle::Hexadecimal), "FF");
    assert_eq!(
        OperatorSet::of::<u16>().format(raw(0xBEEFu16), NumberStyle::Hexadecimal),
        "BEEF"
    );
    assert_eq!(
        OperatorSet::of::<i32>().format(raw(1i32), NumberStyle::Hexadecimal),
        "00000001"
    );
    assert_eq!(
        OperatorSet::of::<u64>().format(raw(255u64), NumberStyle::Hexadecimal),
        "00000000000000FF"
    );
}

#[test]
fn decimal_format() {
    assert_eq!(OperatorSet::of::<i16>().format(raw(-300i16), NumberStyle::Decimal), "-300");
    assert_eq!(
        OperatorSet::of::<u64>().format(raw(u64::MAX), NumberStyle::Decimal),
        "18446744073709551615"
    );
}

#[test]
fn parse_distinguishes_overflow_from_garbage() {
    let ops = OperatorSet::of::<u8>();
    assert_eq!(ops.parse("200", NumberStyle::Decimal), Ok(raw(200u8)));
    assert_eq!(ops.parse("300", NumberStyle::Decimal), Err(NumberParseError::Overflow));
    assert_eq!(ops.parse("-1", NumberStyle::Decimal), Err(NumberParseError::Overflow));
    assert_eq!(ops.parse("-0", NumberStyle::Decimal), Ok(raw(0u8)));
    assert_eq!(ops.parse("+7", NumberStyle::Decimal), Ok(raw(7u8)));
    assert_eq!(ops.parse("abc", NumberStyle::Decimal), Err(NumberParseError::Malformed));
    assert_eq!(ops.parse("", NumberStyle::Decimal), Err(NumberParseError::Malformed));
    assert_eq!(ops.parse("C8", NumberStyle::Hexadecimal), Ok(raw(200u8)));

    let signed = OperatorSet::of::<i8>();
    assert_eq!(signed.parse("-128", NumberStyle::Decimal), Ok(raw(-128i8)));
    assert_eq!(signed.parse("-129", NumberStyle::Decimal), Err(NumberParseError::Overflow));
}

#[test]
fn debug_shows_kind() {
    let text = format!("{:?}", OperatorSet::of::<u32>());
    assert!(text.contains("U32"));
    assert!(text.contains("X8"));
}

proptest! {
    #[test]
    fn hex_rendering_of_u8_is_two_digits(value in any::<u8>()) {
        let text = OperatorSet::of::<u8>().format(raw(value), NumberStyle::Hexadecimal);
        prop_assert_eq!(text.len(), 2);
        prop_assert!(text.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn hex_rendering_of_i8_round_trips(value in any::<i8>()) {
        let ops = OperatorSet::of::<i8>();
        let text = ops.format(raw(value), NumberStyle::Hexadecimal);
        prop_assert_eq!(text.len(), 2);
        prop_assert_eq!(ops.parse(&text, NumberStyle::Hexadecimal).unwrap(), raw(value));
    }

    #[test]
    fn compare_agrees_with_native_order(a in any::<i32>(), b in any::<i32>()) {
        prop_assert_eq!(OperatorSet::of::<i32>().compare(raw(a), raw(b)), a.cmp(&b));
    }
}
