//! Integral kind tags.
//!
//! An `IntegralKind` names one of the eight fixed-width integer
//! representations an enum type may be declared over. The tag is chosen once
//! per enum type and selects the `OperatorSet` every later operation uses.

use std::fmt;

/// One of the eight fixed-width signed/unsigned integer representations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegralKind {
    /// `i8`
    I8,
    /// `u8`
    U8,
    /// `i16`
    I16,
    /// `u16`
    U16,
    /// `i32`
    I32,
    /// `u32`
    U32,
    /// `i64`
    I64,
    /// `u64`
    U64,
}

impl IntegralKind {
    /// Number of kinds.
    pub const COUNT: usize = 8;

    /// Every kind, in declaration order (matches `index()`).
    pub const ALL: [IntegralKind; Self::COUNT] = [
        IntegralKind::I8,
        IntegralKind::U8,
        IntegralKind::I16,
        IntegralKind::U16,
        IntegralKind::I32,
        IntegralKind::U32,
        IntegralKind::I64,
        IntegralKind::U64,
    ];

    /// Dense index in `0..COUNT`, used to address per-kind tables.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::I8 => 0,
            Self::U8 => 1,
            Self::I16 => 2,
            Self::U16 => 3,
            Self::I32 => 4,
            Self::U32 => 5,
            Self::I64 => 6,
            Self::U64 => 7,
        }
    }

    /// Width in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::I8 | Self::U8 => 8,
            Self::I16 | Self::U16 => 16,
            Self::I32 | Self::U32 => 32,
            Self::I64 | Self::U64 => 64,
        }
    }

    /// Whether values of this kind carry a sign.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Number of hex digits in the fixed-width `X` rendering (2/4/8/16).
    #[inline]
    pub const fn hex_width(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 2,
            Self::I16 | Self::U16 => 4,
            Self::I32 | Self::U32 => 8,
            Self::I64 | Self::U64 => 16,
        }
    }

    /// The hex format string for this kind (`"X2"`, `"X4"`, `"X8"`, `"X16"`).
    pub const fn hex_format(self) -> &'static str {
        match self {
            Self::I8 | Self::U8 => "X2",
            Self::I16 | Self::U16 => "X4",
            Self::I32 | Self::U32 => "X8",
            Self::I64 | Self::U64 => "X16",
        }
    }

    /// The Rust spelling of the native type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::I8 => "i8",
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::U16 => "u16",
            Self::I32 => "i32",
            Self::U32 => "u32",
            Self::I64 => "i64",
            Self::U64 => "u64",
        }
    }
}

impl fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
