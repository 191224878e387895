//! Per-kind operator bundles.
//!
//! An `OperatorSet` is a table of plain function pointers instantiated for
//! one `Integral` type. Callers that only know an `IntegralKind` at runtime
//! pick the set once and then call through it, so nothing is boxed and no
//! per-call dispatch on the kind happens.
//!
//! Nothing here fails loudly: range checks answer `bool`, narrowing answers
//! `Option`, and callers decide which of those is an overflow.

use std::cmp::Ordering;
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};

use crate::{Integral, IntegralKind, NativeInt, RawValue};

/// Textual number forms understood by `format` and `parse`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    /// Base 10 with an optional leading sign.
    Decimal,
    /// Base 16, fixed width, upper case on output. Input is read as the
    /// kind's two's-complement bit pattern, without a `0x` prefix.
    Hexadecimal,
}

/// Why a number failed to parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NumberParseError {
    /// Not a number in the requested style.
    #[error("not a well-formed number")]
    Malformed,
    /// Well formed, but outside the kind's range.
    #[error("number is outside the range of the underlying type")]
    Overflow,
}

impl From<ParseIntError> for NumberParseError {
    fn from(err: ParseIntError) -> Self {
        match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => NumberParseError::Overflow,
            _ => NumberParseError::Malformed,
        }
    }
}

type Binary = fn(RawValue, RawValue) -> RawValue;
type Predicate = fn(RawValue, RawValue) -> bool;

/// The primitive operations for one `IntegralKind`.
///
/// Built once per kind by the registry and shared by every enum type of that
/// kind. All values passed in must have been produced for the same kind.
#[derive(Copy, Clone)]
pub struct OperatorSet {
    kind: IntegralKind,
    equals: Predicate,
    greater_than: Predicate,
    and: Binary,
    or: Binary,
    xor: Binary,
    not: fn(RawValue) -> RawValue,
    is_power_of_two: fn(RawValue) -> bool,
    from_i64: fn(i64) -> RawValue,
    from_u64: fn(u64) -> RawValue,
    i64_in_range: fn(i64) -> bool,
    u64_in_range: fn(u64) -> bool,
    to_wide: fn(RawValue) -> i128,
    to_native: fn(RawValue) -> NativeInt,
    format: fn(RawValue, NumberStyle) -> String,
    parse: fn(&str, NumberStyle) -> Result<RawValue, NumberParseError>,
}

impl OperatorSet {
    /// Instantiate the bundle for `T`.
    pub fn of<T: Integral>() -> Self {
        OperatorSet {
            kind: T::KIND,
            equals: equals::<T>,
            greater_than: greater_than::<T>,
            and: and::<T>,
            or: or::<T>,
            xor: xor::<T>,
            not: not::<T>,
            is_power_of_two: is_power_of_two::<T>,
            from_i64: from_i64::<T>,
            from_u64: from_u64::<T>,
            i64_in_range: T::i64_in_range,
            u64_in_range: T::u64_in_range,
            to_wide: to_wide::<T>,
            to_native: to_native::<T>,
            format: format::<T>,
            parse: parse::<T>,
        }
    }

    /// The kind this bundle operates on.
    #[inline]
    pub fn kind(&self) -> IntegralKind {
        self.kind
    }

    /// The fixed-width hex format string (`"X2"` … `"X16"`).
    #[inline]
    pub fn hex_format(&self) -> &'static str {
        self.kind.hex_format()
    }

    #[inline]
    pub fn equals(&self, a: RawValue, b: RawValue) -> bool {
        (self.equals)(a, b)
    }

    #[inline]
    pub fn greater_than(&self, a: RawValue, b: RawValue) -> bool {
        (self.greater_than)(a, b)
    }

    /// Three-way comparison from two `greater_than` evaluations.
    #[inline]
    pub fn compare(&self, a: RawValue, b: RawValue) -> Ordering {
        if self.greater_than(a, b) {
            Ordering::Greater
        } else if self.greater_than(b, a) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    #[inline]
    pub fn and(&self, a: RawValue, b: RawValue) -> RawValue {
        (self.and)(a, b)
    }

    #[inline]
    pub fn or(&self, a: RawValue, b: RawValue) -> RawValue {
        (self.or)(a, b)
    }

    #[inline]
    pub fn xor(&self, a: RawValue, b: RawValue) -> RawValue {
        (self.xor)(a, b)
    }

    #[inline]
    pub fn not(&self, a: RawValue) -> RawValue {
        (self.not)(a)
    }

    /// `x & (x - 1) == 0` in the kind's width; true for zero.
    #[inline]
    pub fn is_power_of_two(&self, a: RawValue) -> bool {
        (self.is_power_of_two)(a)
    }

    /// Truncating conversion; check `i64_in_range` first when loss matters.
    #[inline]
    pub fn from_i64(&self, value: i64) -> RawValue {
        (self.from_i64)(value)
    }

    /// Truncating conversion; check `u64_in_range` first when loss matters.
    #[inline]
    pub fn from_u64(&self, value: u64) -> RawValue {
        (self.from_u64)(value)
    }

    #[inline]
    pub fn i64_in_range(&self, value: i64) -> bool {
        (self.i64_in_range)(value)
    }

    #[inline]
    pub fn u64_in_range(&self, value: u64) -> bool {
        (self.u64_in_range)(value)
    }

    /// Convert to `N`, or `None` if the value does not fit.
    #[inline]
    pub fn narrow<N: Integral>(&self, value: RawValue) -> Option<N> {
        N::try_from((self.to_wide)(value)).ok()
    }

    /// The value as its native type.
    #[inline]
    pub fn to_native(&self, value: RawValue) -> NativeInt {
        (self.to_native)(value)
    }

    /// `high - low` as an unsigned distance, or `None` when `high < low`.
    pub fn distance(&self, low: RawValue, high: RawValue) -> Option<u64> {
        let diff = (self.to_wide)(high) - (self.to_wide)(low);
        u64::try_from(diff).ok()
    }

    /// Render in the given style. Hex output is zero padded to the kind's
    /// fixed width.
    #[inline]
    pub fn format(&self, value: RawValue, style: NumberStyle) -> String {
        (self.format)(value, style)
    }

    #[inline]
    pub fn parse(&self, text: &str, style: NumberStyle) -> Result<RawValue, NumberParseError> {
        (self.parse)(text, style)
    }
}

impl fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorSet")
            .field("kind", &self.kind)
            .field("hex_format", &self.hex_format())
            .finish_non_exhaustive()
    }
}

fn equals<T: Integral>(a: RawValue, b: RawValue) -> bool {
    T::from_raw(a) == T::from_raw(b)
}

fn greater_than<T: Integral>(a: RawValue, b: RawValue) -> bool {
    T::from_raw(a) > T::from_raw(b)
}

fn and<T: Integral>(a: RawValue, b: RawValue) -> RawValue {
    (T::from_raw(a) & T::from_raw(b)).to_raw()
}

fn or<T: Integral>(a: RawValue, b: RawValue) -> RawValue {
    (T::from_raw(a) | T::from_raw(b)).to_raw()
}

fn xor<T: Integral>(a: RawValue, b: RawValue) -> RawValue {
    (T::from_raw(a) ^ T::from_raw(b)).to_raw()
}

fn not<T: Integral>(a: RawValue) -> RawValue {
    (!T::from_raw(a)).to_raw()
}

fn is_power_of_two<T: Integral>(a: RawValue) -> bool {
    let x = T::from_raw(a);
    x & x.wrapping_sub(T::ONE) == T::ZERO
}

fn from_i64<T: Integral>(value: i64) -> RawValue {
    T::wrapping_from_i64(value).to_raw()
}

fn from_u64<T: Integral>(value: u64) -> RawValue {
    T::wrapping_from_u64(value).to_raw()
}

fn to_wide<T: Integral>(a: RawValue) -> i128 {
    T::from_raw(a).into()
}

fn to_native<T: Integral>(a: RawValue) -> NativeInt {
    T::from_raw(a).into()
}

fn format<T: Integral>(a: RawValue, style: NumberStyle) -> String {
    let value = T::from_raw(a);
    match style {
        NumberStyle::Decimal => value.to_string(),
        NumberStyle::Hexadecimal => format!("{value:0width$X}", width = T::KIND.hex_width()),
    }
}

fn parse<T: Integral>(text: &str, style: NumberStyle) -> Result<RawValue, NumberParseError> {
    let value = match style {
        NumberStyle::Decimal => {
            let wide = text.parse::<i128>()?;
            T::try_from(wide).map_err(|_| NumberParseError::Overflow)?
        }
        NumberStyle::Hexadecimal => T::parse_hex(text)?,
    };
    Ok(value.to_raw())
}

#[cfg(test)]
mod tests;
