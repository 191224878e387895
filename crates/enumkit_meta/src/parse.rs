//! Text to value resolution.
//!
//! Input is split on commas; every segment is trimmed and resolved on its
//! own, then all segment values are OR-ed together. A segment resolves by:
//! 1. member name, exact first, then case-insensitive when asked
//! 2. each form of `ParseOptions::format_order`, in order
//!
//! The first segment that resolves to nothing fails the whole parse. If a
//! numeric form recognised the segment but it was out of range, the failure
//! is an overflow; otherwise it is a format error.

use enumkit_ops::{NumberParseError, NumberStyle, OperatorSet, RawValue};
use smallvec::{smallvec, SmallVec};

use crate::error::{self, EnumResult};
use crate::format::EnumFormat;
use crate::table::{Member, MemberTable};
use crate::Description;

/// Separator between combined segments.
pub const SEGMENT_SEPARATOR: char = ',';

/// Parsing configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fall back to case-insensitive name matching.
    /// Defaults to `false`; an exact match always wins.
    pub ignore_case: bool,

    /// Forms tried, in order, after name matching.
    /// Defaults to `[Decimal]`. `Name` here is redundant since names are
    /// always tried first.
    pub format_order: SmallVec<[EnumFormat; 4]>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            ignore_case: false,
            format_order: smallvec![EnumFormat::Decimal],
        }
    }
}

impl ParseOptions {
    /// Default options with the given case sensitivity.
    pub fn with_ignore_case(ignore_case: bool) -> Self {
        Self {
            ignore_case,
            ..Default::default()
        }
    }

    /// Default options with the given numeric and description forms.
    pub fn with_format_order(format_order: impl IntoIterator<Item = EnumFormat>) -> Self {
        Self {
            format_order: format_order.into_iter().collect(),
            ..Default::default()
        }
    }
}

/// What a single segment resolved to.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Resolved<'a> {
    /// Matched a member by name or description.
    Member(&'a Member),
    /// A number, possibly not a defined member.
    Value(RawValue),
}

impl Resolved<'_> {
    pub(crate) fn value(self) -> RawValue {
        match self {
            Resolved::Member(member) => member.value(),
            Resolved::Value(value) => value,
        }
    }
}

/// Borrowed view of what parsing needs from one enum type.
#[derive(Copy, Clone)]
pub(crate) struct Resolver<'a> {
    pub(crate) type_name: &'static str,
    pub(crate) table: &'a MemberTable,
    pub(crate) ops: &'a OperatorSet,
}

impl<'a> Resolver<'a> {
    /// Parse a possibly comma-combined `text`.
    pub(crate) fn parse(self, text: &str, options: &ParseOptions) -> EnumResult<RawValue> {
        if text.trim().is_empty() {
            return Err(error::empty_text(self.type_name));
        }
        text.split(SEGMENT_SEPARATOR)
            .try_fold(RawValue::ZERO, |combined, segment| {
                let resolved = self.segment(segment.trim(), options)?;
                Ok(self.ops.or(combined, resolved.value()))
            })
    }

    /// Resolve a single, already trimmed segment.
    pub(crate) fn segment(
        self,
        segment: &str,
        options: &ParseOptions,
    ) -> EnumResult<Resolved<'a>> {
        if let Some(member) = self.table.get_by_name(segment, options.ignore_case) {
            return Ok(Resolved::Member(member));
        }

        let mut overflowed = false;
        for format in &options.format_order {
            let attempt = match format {
                EnumFormat::Decimal => self.ops.parse(segment, NumberStyle::Decimal),
                EnumFormat::Hexadecimal => self.ops.parse(segment, NumberStyle::Hexadecimal),
                EnumFormat::Name => continue,
                EnumFormat::Description => {
                    match self.by_description(segment, options.ignore_case) {
                        Some(member) => return Ok(Resolved::Member(member)),
                        None => continue,
                    }
                }
            };
            match attempt {
                Ok(value) => return Ok(Resolved::Value(value)),
                Err(NumberParseError::Overflow) => overflowed = true,
                Err(NumberParseError::Malformed) => {}
            }
        }

        tracing::trace!(type_name = self.type_name, segment, overflowed, "unresolved segment");
        if overflowed {
            Err(error::overflow(self.type_name, self.ops.kind(), segment))
        } else {
            Err(error::unknown_value(self.type_name, segment))
        }
    }

    fn by_description(self, segment: &str, ignore_case: bool) -> Option<&'a Member> {
        let folded = ignore_case.then(|| segment.to_lowercase());
        self.table
            .members()
            .iter()
            .find(|member| {
                member.attributes().all::<Description>().any(|d| match &folded {
                    Some(folded) => d.as_str().to_lowercase() == *folded,
                    None => d.as_str() == segment,
                })
            })
    }
}

#[cfg(test)]
mod tests;
