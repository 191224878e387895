//! Process-wide operator registry.
//!
//! One lazily built `OperatorSet` per `IntegralKind`. The first request for a
//! kind builds its set; every later request returns the same `&'static`
//! instance. Building is a pure function of the kind, so concurrent first
//! requests cannot observe different results.

use std::sync::OnceLock;

use crate::{Integral, IntegralKind, OperatorSet};

static OPERATORS: [OnceLock<OperatorSet>; IntegralKind::COUNT] =
    [const { OnceLock::new() }; IntegralKind::COUNT];

/// Get the operator set for `kind`, building it on first use.
pub fn populate(kind: IntegralKind) -> &'static OperatorSet {
    OPERATORS[kind.index()].get_or_init(|| build(kind))
}

/// Get the operator set for the native type `T`.
#[inline]
pub fn operators<T: Integral>() -> &'static OperatorSet {
    populate(T::KIND)
}

/// Whether the set for `kind` has been built yet.
pub fn is_populated(kind: IntegralKind) -> bool {
    OPERATORS[kind.index()].get().is_some()
}

fn build(kind: IntegralKind) -> OperatorSet {
    tracing::debug!(%kind, hex_format = kind.hex_format(), "building operator set");
    match kind {
        IntegralKind::I8 => OperatorSet::of::<i8>(),
        IntegralKind::U8 => OperatorSet::of::<u8>(),
        IntegralKind::I16 => OperatorSet::of::<i16>(),
        IntegralKind::U16 => OperatorSet::of::<u16>(),
        IntegralKind::I32 => OperatorSet::of::<i32>(),
        IntegralKind::U32 => OperatorSet::of::<u32>(),
        IntegralKind::I64 => OperatorSet::of::<i64>(),
        IntegralKind::U64 => OperatorSet::of::<u64>(),
    }
}
