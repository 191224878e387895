use enumkit_ops::{operators, Integral, RawValue};
use pretty_assertions::assert_eq;

use super::{flags_text, render, render_with, EnumFormat, FormatSpec};
use crate::declaration::{Declaration, DeclarationBuilder};
use crate::table::MemberTable;
use crate::{Attributes, Description};

fn table<T: Integral>(decl: DeclarationBuilder<T>) -> MemberTable {
    MemberTable::build(decl.build().members, operators::<T>())
}

fn abc() -> MemberTable {
    table(
        Declaration::builder::<u8>("Abc")
            .member("A", 1)
            .member("B", 2)
            .member("C", 4),
    )
}

fn g<T: Integral>(table: &MemberTable, is_flags: bool, value: T) -> String {
    render(table, operators::<T>(), is_flags, value.to_raw(), FormatSpec::General)
}

#[test]
fn spec_tokens() {
    assert_eq!(FormatSpec::parse("G"), Some(FormatSpec::General));
    assert_eq!(FormatSpec::parse(""), Some(FormatSpec::General));
    assert_eq!(FormatSpec::parse("x"), Some(FormatSpec::Hex));
    assert_eq!(FormatSpec::parse("f"), Some(FormatSpec::Flags));
    assert_eq!(FormatSpec::parse("d"), Some(FormatSpec::Decimal));
    assert_eq!(FormatSpec::parse("GG"), None);
    assert_eq!(FormatSpec::parse("N"), None);
    assert!("Q".parse::<FormatSpec>().is_err_and(|e| e.is_format()));
    assert_eq!(FormatSpec::Hex.to_string(), "X");
}

#[test]
fn flags_scenario() {
    let abc = abc();
    assert_eq!(g(&abc, true, 5u8), "A, C");
    assert_eq!(g(&abc, true, 7u8), "A, B, C");
    assert_eq!(g(&abc, true, 8u8), "8");
    assert_eq!(g(&abc, true, 2u8), "B");
}

#[test]
fn leftover_bits_fall_back_to_decimal() {
    // 13 = A | C | 8; no partial decomposition is emitted.
    assert_eq!(g(&abc(), true, 13u8), "13");
}

#[test]
fn general_on_plain_type_never_decomposes() {
    assert_eq!(g(&abc(), false, 5u8), "5");
    assert_eq!(g(&abc(), false, 4u8), "C");
}

#[test]
fn flags_spec_ignores_marker() {
    let abc = abc();
    let ops = operators::<u8>();
    assert_eq!(render(&abc, ops, false, 3u8.to_raw(), FormatSpec::Flags), "A, B");
}

#[test]
fn composite_members_match_first() {
    let perms = table(
        Declaration::builder::<u32>("Perms")
            .member("Read", 1)
            .member("Write", 2)
            .member("ReadWrite", 3)
            .member("Exec", 4),
    );
    let ops = operators::<u32>();
    assert_eq!(flags_text(&perms, ops, 3u32.to_raw()), "ReadWrite");
    assert_eq!(flags_text(&perms, ops, 7u32.to_raw()), "ReadWrite, Exec");
}

#[test]
fn zero_decomposition() {
    let ops = operators::<u8>();
    let with_none = table(
        Declaration::builder::<u8>("WithNone")
            .member("None", 0)
            .member("A", 1),
    );
    assert_eq!(flags_text(&with_none, ops, RawValue::ZERO), "None");
    assert_eq!(flags_text(&abc(), ops, RawValue::ZERO), "0");
}

#[test]
fn empty_table_renders_numbers() {
    let empty = table(Declaration::builder::<i16>("Empty"));
    assert_eq!(g(&empty, true, -3i16), "-3");
    assert_eq!(g(&empty, false, 0i16), "0");
}

#[test]
fn decimal_and_hex() {
    let signed = table(Declaration::builder::<i8>("Signed").member("Neg", -1));
    let ops = operators::<i8>();
    let neg = (-1i8).to_raw();
    assert_eq!(render(&signed, ops, false, neg, FormatSpec::Decimal), "-1");
    assert_eq!(render(&signed, ops, false, neg, FormatSpec::Hex), "FF");
    assert_eq!(render(&signed, ops, false, neg, FormatSpec::General), "Neg");

    let wide = table(Declaration::builder::<u32>("Wide"));
    assert_eq!(
        render(&wide, operators::<u32>(), false, 0xAB_u32.to_raw(), FormatSpec::Hex),
        "000000AB"
    );
}

#[test]
fn preferred_formats() {
    let described = table(
        Declaration::builder::<u16>("Described")
            .member_with("Red", 1, Attributes::new().with(Description::new("Rouge")))
            .member("Green", 2),
    );
    let ops = operators::<u16>();
    let order = [EnumFormat::Description, EnumFormat::Name, EnumFormat::Hexadecimal];

    assert_eq!(render_with(&described, ops, 1u16.to_raw(), &order).as_deref(), Some("Rouge"));
    assert_eq!(render_with(&described, ops, 2u16.to_raw(), &order).as_deref(), Some("Green"));
    assert_eq!(render_with(&described, ops, 9u16.to_raw(), &order).as_deref(), Some("0009"));
    assert_eq!(
        render_with(&described, ops, 9u16.to_raw(), &[EnumFormat::Name, EnumFormat::Description]),
        None
    );
    assert_eq!(render_with(&described, ops, 9u16.to_raw(), &[]), None);
}
