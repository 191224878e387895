//! Kind-erased integer carriers.
//!
//! `RawValue` lets code that picked its `IntegralKind` at runtime move values
//! around without boxing them. `NativeInt` is the tagged form used where the
//! caller's own integer type matters (coercion input, underlying values).

use std::fmt;

use crate::IntegralKind;

/// A value of some `IntegralKind`, held in 64 bits.
///
/// Signed kinds are stored sign-extended and unsigned kinds zero-extended,
/// so `as_i64()` is exact for signed kinds and `as_u64()` is exact for
/// unsigned kinds. The bits only mean something together with the kind that
/// produced them; comparisons between values of different kinds are not
/// meaningful.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct RawValue(u64);

impl RawValue {
    /// Zero, identical for every kind.
    pub const ZERO: RawValue = RawValue(0);

    /// Carrier for a sign-extended value.
    #[inline]
    pub const fn from_i64(value: i64) -> Self {
        RawValue(u64::from_ne_bytes(value.to_ne_bytes()))
    }

    /// Carrier for a zero-extended value.
    #[inline]
    pub const fn from_u64(value: u64) -> Self {
        RawValue(value)
    }

    /// The signed view of the carried bits.
    #[inline]
    pub const fn as_i64(self) -> i64 {
        i64::from_ne_bytes(self.0.to_ne_bytes())
    }

    /// The unsigned view of the carried bits.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Whether every bit is clear.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

/// A 64-bit widening of a `NativeInt`, keeping its sign.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Widened {
    /// Widened from a signed type.
    Signed(i64),
    /// Widened from an unsigned type.
    Unsigned(u64),
}

/// A value of one of the eight native integer types, tagged with its type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NativeInt {
    /// An `i8`.
    I8(i8),
    /// A `u8`.
    U8(u8),
    /// An `i16`.
    I16(i16),
    /// A `u16`.
    U16(u16),
    /// An `i32`.
    I32(i32),
    /// A `u32`.
    U32(u32),
    /// An `i64`.
    I64(i64),
    /// A `u64`.
    U64(u64),
}

impl NativeInt {
    /// The kind of the carried value.
    pub const fn kind(self) -> IntegralKind {
        match self {
            Self::I8(_) => IntegralKind::I8,
            Self::U8(_) => IntegralKind::U8,
            Self::I16(_) => IntegralKind::I16,
            Self::U16(_) => IntegralKind::U16,
            Self::I32(_) => IntegralKind::I32,
            Self::U32(_) => IntegralKind::U32,
            Self::I64(_) => IntegralKind::I64,
            Self::U64(_) => IntegralKind::U64,
        }
    }

    /// Widen to 64 bits, signed types to `i64` and unsigned types to `u64`.
    pub fn widen(self) -> Widened {
        match self {
            Self::I8(v) => Widened::Signed(i64::from(v)),
            Self::I16(v) => Widened::Signed(i64::from(v)),
            Self::I32(v) => Widened::Signed(i64::from(v)),
            Self::I64(v) => Widened::Signed(v),
            Self::U8(v) => Widened::Unsigned(u64::from(v)),
            Self::U16(v) => Widened::Unsigned(u64::from(v)),
            Self::U32(v) => Widened::Unsigned(u64::from(v)),
            Self::U64(v) => Widened::Unsigned(v),
        }
    }
}

impl fmt::Display for NativeInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.widen() {
            Widened::Signed(v) => write!(f, "{v}"),
            Widened::Unsigned(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_from_native {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for NativeInt {
                #[inline]
                fn from(value: $t) -> Self {
                    NativeInt::$variant(value)
                }
            }
        )*
    };
}

impl_from_native! {
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
}
