//! Integral operator registry.
//!
//! Numeric operations generic over the eight fixed-width integer types, with
//! the width picked at runtime:
//! - [`IntegralKind`] tags a width and signedness
//! - [`RawValue`] carries a value of any kind without boxing
//! - [`OperatorSet`] bundles compare, bitwise, range-check, narrowing,
//!   formatting and parsing primitives for one kind
//! - [`populate`] hands out the process-wide, build-once set for a kind
//!
//! # Design
//!
//! - Closed set of kinds; the [`Integral`] trait is sealed
//! - Sets are built lazily and never mutated afterwards
//! - No failures at this layer: range checks return `bool`, narrowing
//!   returns `Option`, parsing reports [`NumberParseError`]

mod integral;
mod kind;
mod operators;
mod registry;
mod value;

pub use integral::Integral;
pub use kind::IntegralKind;
pub use operators::{NumberParseError, NumberStyle, OperatorSet};
pub use registry::{is_populated, operators, populate};
pub use value::{NativeInt, RawValue, Widened};
