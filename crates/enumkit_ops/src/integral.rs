//! The `Integral` trait: what the operator registry needs from a native
//! integer type.
//!
//! Implemented for exactly the eight supported types and sealed, so an
//! `IntegralKind` and an `Integral` impl are always in one-to-one
//! correspondence.

use std::fmt::{Debug, Display, UpperHex};
use std::hash::Hash;
use std::num::ParseIntError;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::str::FromStr;

use crate::{IntegralKind, NativeInt, RawValue};

mod sealed {
    pub trait Sealed {}
}

/// A native fixed-width integer type usable as an enum's underlying type.
pub trait Integral:
    sealed::Sealed
    + Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + UpperHex
    + Send
    + Sync
    + 'static
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + FromStr<Err = ParseIntError>
    + TryFrom<i128>
    + Into<i128>
    + Into<NativeInt>
{
    /// The kind tag for this type.
    const KIND: IntegralKind;

    /// `0`
    const ZERO: Self;

    /// `1`
    const ONE: Self;

    /// Carry this value in kind-erased form.
    fn to_raw(self) -> RawValue;

    /// Recover a value from its carrier. Truncates if `raw` came from a
    /// wider kind.
    fn from_raw(raw: RawValue) -> Self;

    /// Truncating conversion from `i64`.
    fn wrapping_from_i64(value: i64) -> Self;

    /// Truncating conversion from `u64`.
    fn wrapping_from_u64(value: u64) -> Self;

    /// Whether `value` fits this type.
    fn i64_in_range(value: i64) -> bool;

    /// Whether `value` fits this type.
    fn u64_in_range(value: u64) -> bool;

    /// Wrapping subtraction in this type's width.
    fn wrapping_sub(self, rhs: Self) -> Self;

    /// Parse hex digits as this type's two's-complement bit pattern.
    fn parse_hex(text: &str) -> Result<Self, ParseIntError>;
}

macro_rules! impl_integral_common {
    ($t:ty, $kind:ident) => {
        impl sealed::Sealed for $t {}

        const _: () = assert!(IntegralKind::$kind.bits() == <$t>::BITS);
    };
}

macro_rules! impl_signed {
    ($($t:ty, $unsigned:ty => $kind:ident);* $(;)?) => {
        $(
            impl_integral_common!($t, $kind);

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_possible_wrap,
                clippy::unnecessary_cast,
                clippy::useless_conversion,
                reason = "the macro also expands for the 64-bit kinds; truncation is the documented behaviour"
            )]
            impl Integral for $t {
                const KIND: IntegralKind = IntegralKind::$kind;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn to_raw(self) -> RawValue {
                    RawValue::from_i64(i64::from(self))
                }

                #[inline]
                fn from_raw(raw: RawValue) -> Self {
                    raw.as_i64() as $t
                }

                #[inline]
                fn wrapping_from_i64(value: i64) -> Self {
                    value as $t
                }

                #[inline]
                fn wrapping_from_u64(value: u64) -> Self {
                    value as $t
                }

                #[inline]
                fn i64_in_range(value: i64) -> bool {
                    <$t>::try_from(value).is_ok()
                }

                #[inline]
                fn u64_in_range(value: u64) -> bool {
                    <$t>::try_from(value).is_ok()
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                fn parse_hex(text: &str) -> Result<Self, ParseIntError> {
                    <$unsigned>::from_str_radix(text, 16)
                        .map(|bits| <$t>::from_ne_bytes(bits.to_ne_bytes()))
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($t:ty => $kind:ident);* $(;)?) => {
        $(
            impl_integral_common!($t, $kind);

            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                clippy::unnecessary_cast,
                clippy::useless_conversion,
                reason = "the macro also expands for the 64-bit kinds; truncation is the documented behaviour"
            )]
            impl Integral for $t {
                const KIND: IntegralKind = IntegralKind::$kind;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn to_raw(self) -> RawValue {
                    RawValue::from_u64(u64::from(self))
                }

                #[inline]
                fn from_raw(raw: RawValue) -> Self {
                    raw.as_u64() as $t
                }

                #[inline]
                fn wrapping_from_i64(value: i64) -> Self {
                    value as $t
                }

                #[inline]
                fn wrapping_from_u64(value: u64) -> Self {
                    value as $t
                }

                #[inline]
                fn i64_in_range(value: i64) -> bool {
                    <$t>::try_from(value).is_ok()
                }

                #[inline]
                fn u64_in_range(value: u64) -> bool {
                    <$t>::try_from(value).is_ok()
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                fn parse_hex(text: &str) -> Result<Self, ParseIntError> {
                    <$t>::from_str_radix(text, 16)
                }
            }
        )*
    };
}

impl_signed! {
    i8, u8 => I8;
    i16, u16 => I16;
    i32, u32 => I32;
    i64, u64 => I64;
}

impl_unsigned! {
    u8 => U8;
    u16 => U16;
    u32 => U32;
    u64 => U64;
}
