//! The per-type metadata facade.
//!
//! `EnumMetadata` owns one type's member table and borrows the process-wide
//! operator set of its kind. It works on kind-erased `RawValue`s; the typed
//! handle in `info` converts to and from the enum type itself.
//!
//! Built once, never mutated, safe to read from any number of threads.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use enumkit_ops::{Integral, IntegralKind, NativeInt, NumberStyle, OperatorSet, RawValue, Widened};

use crate::declaration::Declaration;
use crate::error::{self, EnumResult};
use crate::format::{self, EnumFormat, FormatSpec};
use crate::parse::{ParseOptions, Resolved, Resolver};
use crate::table::{Member, MemberTable, UniqueMembers};
use crate::Attributes;

/// Label used when coercion validates without a caller-supplied one.
const DEFAULT_LABEL: &str = "value";

/// A raw input for coercion: one of the eight integers, or text.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RawInput<'a> {
    /// A native integer, range-checked against the enum's kind.
    Integer(NativeInt),
    /// A name, number or comma-separated combination, parsed with default options.
    Text(&'a str),
}

impl From<NativeInt> for RawInput<'_> {
    fn from(value: NativeInt) -> Self {
        RawInput::Integer(value)
    }
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(text: &'a str) -> Self {
        RawInput::Text(text)
    }
}

impl<'a> From<&'a String> for RawInput<'a> {
    fn from(text: &'a String) -> Self {
        RawInput::Text(text)
    }
}

macro_rules! impl_raw_input_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for RawInput<'_> {
                fn from(value: $t) -> Self {
                    RawInput::Integer(NativeInt::from(value))
                }
            }
        )*
    };
}

impl_raw_input_from_int!(i8, u8, i16, u16, i32, u32, i64, u64);

impl<'a> RawInput<'a> {
    /// Interpret a dynamically typed value. Accepts the eight integers,
    /// `String` and `&'static str`.
    pub fn from_any(raw: &'a dyn Any) -> Option<Self> {
        macro_rules! try_integer {
            ($($t:ty),*) => {
                $(
                    if let Some(&value) = raw.downcast_ref::<$t>() {
                        return Some(RawInput::from(value));
                    }
                )*
            };
        }
        try_integer!(i8, u8, i16, u16, i32, u32, i64, u64);

        if let Some(text) = raw.downcast_ref::<String>() {
            return Some(RawInput::Text(text));
        }
        raw.downcast_ref::<&'static str>()
            .map(|text| RawInput::Text(*text))
    }
}

/// Cached metadata of one enum type.
pub struct EnumMetadata {
    type_name: &'static str,
    kind: IntegralKind,
    ops: &'static OperatorSet,
    table: MemberTable,
    is_flags: bool,
}

impl EnumMetadata {
    /// Sort and index a declaration.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(type_name = declaration.type_name, kind = %declaration.kind)
    )]
    pub fn build(declaration: Declaration) -> Self {
        let ops = enumkit_ops::populate(declaration.kind);
        let table = MemberTable::build(declaration.members, ops);
        tracing::debug!(
            members = table.len(),
            distinct = table.distinct_len(),
            contiguous = table.is_contiguous(),
            is_flags = declaration.is_flags,
            "built enum metadata"
        );
        EnumMetadata {
            type_name: declaration.type_name,
            kind: declaration.kind,
            ops,
            table,
            is_flags: declaration.is_flags,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn kind(&self) -> IntegralKind {
        self.kind
    }

    #[inline]
    pub fn operators(&self) -> &'static OperatorSet {
        self.ops
    }

    #[inline]
    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.table.is_contiguous()
    }

    fn resolver(&self) -> Resolver<'_> {
        Resolver {
            type_name: self.type_name,
            table: &self.table,
            ops: self.ops,
        }
    }

    // Coercion

    /// Coerce an integer or text into a value of this type.
    ///
    /// Integers are widened keeping their sign and range-checked against
    /// the kind. Text is parsed with default options. With `validate`, the
    /// result must also pass `is_valid`.
    pub fn to_object(&self, raw: RawInput<'_>, validate: bool) -> EnumResult<RawValue> {
        let value = match raw {
            RawInput::Integer(number) => self.coerce_integer(number)?,
            RawInput::Text(text) => self.parse(text, &ParseOptions::default())?,
        };
        if validate {
            self.validate(value, DEFAULT_LABEL)
        } else {
            Ok(value)
        }
    }

    pub fn try_to_object(&self, raw: RawInput<'_>, validate: bool) -> Option<RawValue> {
        self.to_object(raw, validate).ok()
    }

    /// `to_object` for a dynamically typed input.
    pub fn to_object_any(&self, raw: &dyn Any, validate: bool) -> EnumResult<RawValue> {
        let input =
            RawInput::from_any(raw).ok_or_else(|| error::unsupported_input(self.type_name))?;
        self.to_object(input, validate)
    }

    fn coerce_integer(&self, number: NativeInt) -> EnumResult<RawValue> {
        let fits = match number.widen() {
            Widened::Signed(v) => self.ops.i64_in_range(v).then(|| self.ops.from_i64(v)),
            Widened::Unsigned(v) => self.ops.u64_in_range(v).then(|| self.ops.from_u64(v)),
        };
        fits.ok_or_else(|| error::overflow(self.type_name, self.kind, number))
    }

    // Validation

    /// Whether `value` is exactly some member's value.
    #[inline]
    pub fn is_defined(&self, value: RawValue) -> bool {
        self.table.contains(value)
    }

    /// For flags types, whether every bit of `value` belongs to some member.
    /// Otherwise whether `value` is defined.
    pub fn is_valid(&self, value: RawValue) -> bool {
        if self.is_flags {
            let mask = self.table.flags_mask();
            return self.ops.equals(self.ops.and(value, mask), value);
        }
        if self.table.is_contiguous() {
            if let (Some(min), Some(max)) = (self.table.min_value(), self.table.max_value()) {
                return !self.ops.greater_than(min, value) && !self.ops.greater_than(value, max);
            }
        }
        self.is_defined(value)
    }

    /// `value` itself if valid, else an `InvalidValue` error naming `label`.
    pub fn validate(&self, value: RawValue, label: &str) -> EnumResult<RawValue> {
        if self.is_valid(value) {
            Ok(value)
        } else {
            Err(error::invalid_value(
                self.type_name,
                self.ops.format(value, NumberStyle::Decimal),
                label,
            ))
        }
    }

    // Formatting

    /// The `G` rendering.
    pub fn as_string(&self, value: RawValue) -> String {
        self.format_spec(value, FormatSpec::General)
    }

    /// Render with a format token (`G`, `F`, `D`, `X`).
    pub fn format(&self, value: RawValue, spec: &str) -> EnumResult<String> {
        let spec: FormatSpec = spec.parse()?;
        Ok(self.format_spec(value, spec))
    }

    pub fn format_spec(&self, value: RawValue, spec: FormatSpec) -> String {
        format::render(&self.table, self.ops, self.is_flags, value, spec)
    }

    /// Render in the first applicable of `formats`, or `None` if none apply.
    pub fn as_string_with(&self, value: RawValue, formats: &[EnumFormat]) -> Option<String> {
        format::render_with(&self.table, self.ops, value, formats)
    }

    // Conversion

    /// The value as its native underlying integer.
    #[inline]
    pub fn underlying(&self, value: RawValue) -> NativeInt {
        self.ops.to_native(value)
    }

    /// Convert to `N`, failing with `Overflow` if the value does not fit.
    pub fn convert<N: Integral>(&self, value: RawValue) -> EnumResult<N> {
        self.ops
            .narrow::<N>(value)
            .ok_or_else(|| error::overflow(self.type_name, N::KIND, self.underlying(value)))
    }

    pub fn to_i8(&self, value: RawValue) -> EnumResult<i8> {
        self.convert(value)
    }

    pub fn to_u8(&self, value: RawValue) -> EnumResult<u8> {
        self.convert(value)
    }

    pub fn to_i16(&self, value: RawValue) -> EnumResult<i16> {
        self.convert(value)
    }

    pub fn to_u16(&self, value: RawValue) -> EnumResult<u16> {
        self.convert(value)
    }

    pub fn to_i32(&self, value: RawValue) -> EnumResult<i32> {
        self.convert(value)
    }

    pub fn to_u32(&self, value: RawValue) -> EnumResult<u32> {
        self.convert(value)
    }

    pub fn to_i64(&self, value: RawValue) -> EnumResult<i64> {
        self.convert(value)
    }

    pub fn to_u64(&self, value: RawValue) -> EnumResult<u64> {
        self.convert(value)
    }

    // Comparison

    #[inline]
    pub fn equals(&self, a: RawValue, b: RawValue) -> bool {
        self.ops.equals(a, b)
    }

    #[inline]
    pub fn compare(&self, a: RawValue, b: RawValue) -> Ordering {
        self.ops.compare(a, b)
    }

    // Members

    /// The first declared member with `value`, if any.
    #[inline]
    pub fn member(&self, value: RawValue) -> Option<&Member> {
        self.table.get(value)
    }

    #[inline]
    pub fn member_by_name(&self, name: &str, ignore_case: bool) -> Option<&Member> {
        self.table.get_by_name(name, ignore_case)
    }

    /// The member name for `value`, if defined.
    #[inline]
    pub fn name(&self, value: RawValue) -> Option<&str> {
        self.member(value).map(Member::name)
    }

    /// Number of members, or of distinct values when `unique`.
    pub fn member_count(&self, unique: bool) -> usize {
        if unique {
            self.table.distinct_len()
        } else {
            self.table.len()
        }
    }

    /// Members ascending by value; with `unique`, only the first declared
    /// member of each value.
    pub fn members(&self, unique: bool) -> Members<'_> {
        if unique {
            Members::Unique(self.table.unique())
        } else {
            Members::All(self.table.members().iter())
        }
    }

    pub fn names(&self, unique: bool) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.members(unique).map(Member::name)
    }

    pub fn values(&self, unique: bool) -> impl DoubleEndedIterator<Item = RawValue> + '_ {
        self.members(unique).map(Member::value)
    }

    /// The OR of every member value.
    #[inline]
    pub fn all_flags(&self) -> RawValue {
        self.table.flags_mask()
    }

    // Attributes

    /// Attributes of the member with `value`, if defined.
    pub fn attributes(&self, value: RawValue) -> Option<&Attributes> {
        self.member(value).map(Member::attributes)
    }

    pub fn attribute<A: Any>(&self, value: RawValue) -> Option<&A> {
        self.attributes(value).and_then(Attributes::get::<A>)
    }

    pub fn has_attribute<A: Any>(&self, value: RawValue) -> bool {
        self.attribute::<A>(value).is_some()
    }

    // Parsing

    /// Parse a name, number or comma-separated combination of either.
    pub fn parse(&self, text: &str, options: &ParseOptions) -> EnumResult<RawValue> {
        self.resolver().parse(text, options)
    }

    pub fn try_parse(&self, text: &str, options: &ParseOptions) -> Option<RawValue> {
        self.parse(text, options).ok()
    }

    /// Parse a single segment that must resolve to a defined member.
    pub fn parse_member(&self, text: &str, options: &ParseOptions) -> EnumResult<&Member> {
        let segment = text.trim();
        if segment.is_empty() {
            return Err(error::empty_text(self.type_name));
        }
        match self.resolver().segment(segment, options)? {
            Resolved::Member(member) => Ok(member),
            Resolved::Value(value) => self
                .member(value)
                .ok_or_else(|| error::not_a_member(self.type_name, segment)),
        }
    }

    pub fn try_parse_member(&self, text: &str, options: &ParseOptions) -> Option<&Member> {
        self.parse_member(text, options).ok()
    }
}

impl fmt::Debug for EnumMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumMetadata")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .field("is_flags", &self.is_flags)
            .field("members", &self.table.len())
            .finish_non_exhaustive()
    }
}

/// Iterator over an enum's members, all or unique-valued.
#[derive(Clone, Debug)]
pub enum Members<'a> {
    All(std::slice::Iter<'a, Member>),
    Unique(UniqueMembers<'a>),
}

impl<'a> Iterator for Members<'a> {
    type Item = &'a Member;

    fn next(&mut self) -> Option<&'a Member> {
        match self {
            Members::All(iter) => iter.next(),
            Members::Unique(iter) => iter.next(),
        }
    }
}

impl<'a> DoubleEndedIterator for Members<'a> {
    fn next_back(&mut self) -> Option<&'a Member> {
        match self {
            Members::All(iter) => iter.next_back(),
            Members::Unique(iter) => iter.next_back(),
        }
    }
}
