#![allow(clippy::unwrap_used, reason = "test code uses unwrap for concise assertions")]

use enumkit_ops::{operators, Integral, RawValue};
use pretty_assertions::assert_eq;

use super::{ParseOptions, Resolved, Resolver};
use crate::declaration::{Declaration, DeclarationBuilder};
use crate::format::EnumFormat;
use crate::table::MemberTable;
use crate::{Attributes, Description, EnumError};

fn table<T: Integral>(decl: DeclarationBuilder<T>) -> MemberTable {
    MemberTable::build(decl.build().members, operators::<T>())
}

fn resolver<T: Integral>(table: &MemberTable) -> Resolver<'_> {
    Resolver {
        type_name: "Test",
        table,
        ops: operators::<T>(),
    }
}

fn abc() -> MemberTable {
    table(
        Declaration::builder::<u8>("Abc")
            .member("A", 1)
            .member("B", 2)
            .member("C", 4),
    )
}

#[test]
fn default_options() {
    let options = ParseOptions::default();
    assert!(!options.ignore_case);
    assert_eq!(options.format_order.as_slice(), &[EnumFormat::Decimal]);
    assert!(ParseOptions::with_ignore_case(true).ignore_case);
}

#[test]
fn names_and_numbers() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    let options = ParseOptions::default();

    assert_eq!(r.parse("B", &options), Ok(RawValue::from_u64(2)));
    assert_eq!(r.parse("  C ", &options), Ok(RawValue::from_u64(4)));
    assert_eq!(r.parse("200", &options), Ok(RawValue::from_u64(200)));
}

#[test]
fn comma_combination() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    let options = ParseOptions::default();

    assert_eq!(r.parse("A, C", &options), Ok(RawValue::from_u64(5)));
    assert_eq!(r.parse("A,8", &options), Ok(RawValue::from_u64(9)));
    assert!(r.parse("A,,C", &options).unwrap_err().is_format());
}

#[test]
fn case_sensitivity() {
    let abc = abc();
    let r = resolver::<u8>(&abc);

    assert_eq!(r.parse("a", &ParseOptions::with_ignore_case(true)), Ok(RawValue::from_u64(1)));
    let err = r.parse("a", &ParseOptions::default()).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn empty_text() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    for text in ["", "   ", "\t\n"] {
        assert!(r.parse(text, &ParseOptions::default()).unwrap_err().is_format());
    }
}

#[test]
fn out_of_range_is_overflow() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    let err = r.parse("256", &ParseOptions::default()).unwrap_err();
    assert!(err.is_overflow());
    assert!(r.parse("-1", &ParseOptions::default()).unwrap_err().is_overflow());
}

#[test]
fn negative_zero_is_in_range_for_unsigned() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    assert_eq!(r.parse("-0", &ParseOptions::default()), Ok(RawValue::ZERO));
    assert_eq!(r.parse("-0, A", &ParseOptions::default()), Ok(1u8.to_raw()));
}

#[test]
fn unknown_name_is_format_error() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    let err = r.parse("Mauve", &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, EnumError::Format { .. }));
}

#[test]
fn hex_only_when_configured() {
    let codes = table(Declaration::builder::<i16>("Codes").member("Neg", -1));
    let r = resolver::<i16>(&codes);

    assert!(r.parse("FFFF", &ParseOptions::default()).is_err());
    let hex = ParseOptions::with_format_order([EnumFormat::Hexadecimal]);
    assert_eq!(r.parse("FFFF", &hex), Ok(RawValue::from_i64(-1)));
    assert!(r.parse("12", &hex).is_ok());

    // "10" reads as decimal when decimal comes first.
    let both = ParseOptions::with_format_order([EnumFormat::Decimal, EnumFormat::Hexadecimal]);
    assert_eq!(r.parse("10", &both), Ok(RawValue::from_i64(10)));
    assert_eq!(r.parse("1F", &both), Ok(RawValue::from_i64(31)));
}

#[test]
fn overflow_remembered_across_forms() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    let both = ParseOptions::with_format_order([EnumFormat::Decimal, EnumFormat::Hexadecimal]);
    // Decimal overflows; hex "300" is 0x300, also too wide for u8.
    assert!(r.parse("300", &both).unwrap_err().is_overflow());
}

#[test]
fn descriptions() {
    let colors = table(
        Declaration::builder::<u32>("Colors")
            .member_with("Red", 1, Attributes::new().with(Description::new("Rouge")))
            .member("Green", 2),
    );
    let r = resolver::<u32>(&colors);
    let by_description = ParseOptions::with_format_order([EnumFormat::Description]);

    assert_eq!(r.parse("Rouge", &by_description), Ok(RawValue::from_u64(1)));
    assert!(r.parse("rouge", &by_description).is_err());
    let folded = ParseOptions {
        ignore_case: true,
        ..by_description
    };
    assert_eq!(r.parse("ROUGE, green", &folded), Ok(RawValue::from_u64(3)));
    assert!(r.parse("1", &folded).is_err());
}

#[test]
fn single_segment_does_not_split() {
    let abc = abc();
    let r = resolver::<u8>(&abc);
    assert!(r.segment("A, C", &ParseOptions::default()).is_err());
    let resolved = r.segment("A", &ParseOptions::default()).unwrap();
    assert_eq!(resolved.value(), RawValue::from_u64(1));
}

#[test]
fn segment_keeps_the_matched_alias() {
    let aliased = table(
        Declaration::builder::<u8>("Letter")
            .member("A", 10)
            .member("B", 11)
            .member("Alpha", 10),
    );
    let r = resolver::<u8>(&aliased);
    let options = ParseOptions::with_format_order([EnumFormat::Decimal]);

    match r.segment("Alpha", &options).unwrap() {
        Resolved::Member(member) => assert_eq!(member.name(), "Alpha"),
        Resolved::Value(value) => panic!("expected a member, got {value:?}"),
    }
    match r.segment("10", &options).unwrap() {
        Resolved::Value(value) => assert_eq!(value, 10u8.to_raw()),
        Resolved::Member(member) => panic!("expected a number, got {}", member.name()),
    }
}
