//! Text rendering of enum values.
//!
//! Two vocabularies:
//! - [`FormatSpec`]: the stable `G`/`F`/`D`/`X` tokens
//! - [`EnumFormat`]: the ordered preference list used by
//!   `EnumMetadata::as_string_with` and by parsing
//!
//! # Flags decomposition
//!
//! The distinct member values are walked from highest to lowest. A non-zero
//! member whose bits are all still present in the residue contributes its
//! name and clears those bits. If any bits remain at the end, nothing is
//! emitted and the whole value is rendered in decimal instead. Matched names
//! are printed lowest value first, joined by `", "`.

use std::fmt;
use std::str::FromStr;

use enumkit_ops::{NumberStyle, OperatorSet, RawValue};
use smallvec::SmallVec;

use crate::error::{self, EnumError};
use crate::table::MemberTable;
use crate::Description;

/// Delimiter between member names in a flags rendering.
pub const FLAGS_SEPARATOR: &str = ", ";

/// One of the stable format tokens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormatSpec {
    /// `G`: the member name, else flags decomposition for flags types, else
    /// decimal.
    #[default]
    General,
    /// `F`: flags decomposition regardless of the flags marker.
    Flags,
    /// `D`: decimal.
    Decimal,
    /// `X`: fixed-width upper-case hex.
    Hex,
}

impl FormatSpec {
    /// Parse a token. Lower case is accepted and empty text means `G`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "" | "G" | "g" => Some(FormatSpec::General),
            "F" | "f" => Some(FormatSpec::Flags),
            "D" | "d" => Some(FormatSpec::Decimal),
            "X" | "x" => Some(FormatSpec::Hex),
            _ => None,
        }
    }

    /// The canonical upper-case token.
    pub fn token(self) -> &'static str {
        match self {
            FormatSpec::General => "G",
            FormatSpec::Flags => "F",
            FormatSpec::Decimal => "D",
            FormatSpec::Hex => "X",
        }
    }
}

impl FromStr for FormatSpec {
    type Err = EnumError;

    fn from_str(token: &str) -> Result<Self, EnumError> {
        FormatSpec::parse(token).ok_or_else(|| error::invalid_format(token))
    }
}

impl fmt::Display for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A textual form of an enum value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EnumFormat {
    /// Decimal digits with optional sign.
    Decimal,
    /// Fixed-width upper-case hex of the kind's bit pattern.
    Hexadecimal,
    /// The member name.
    Name,
    /// The member's [`Description`] attribute.
    Description,
}

/// Render `value` according to `spec`.
pub(crate) fn render(
    table: &MemberTable,
    ops: &OperatorSet,
    is_flags: bool,
    value: RawValue,
    spec: FormatSpec,
) -> String {
    match spec {
        FormatSpec::Decimal => ops.format(value, NumberStyle::Decimal),
        FormatSpec::Hex => ops.format(value, NumberStyle::Hexadecimal),
        FormatSpec::Flags => flags_text(table, ops, value),
        FormatSpec::General => match table.get(value) {
            Some(member) => member.name().to_owned(),
            None if is_flags => flags_text(table, ops, value),
            None => ops.format(value, NumberStyle::Decimal),
        },
    }
}

/// Render `value` in the first applicable form of `formats`.
///
/// `Name` and `Description` apply only to defined members (and, for
/// `Description`, only when the member carries one).
pub(crate) fn render_with(
    table: &MemberTable,
    ops: &OperatorSet,
    value: RawValue,
    formats: &[EnumFormat],
) -> Option<String> {
    formats.iter().find_map(|format| match format {
        EnumFormat::Decimal => Some(ops.format(value, NumberStyle::Decimal)),
        EnumFormat::Hexadecimal => Some(ops.format(value, NumberStyle::Hexadecimal)),
        EnumFormat::Name => table.get(value).map(|m| m.name().to_owned()),
        EnumFormat::Description => table
            .get(value)
            .and_then(|m| m.attributes().get::<Description>())
            .map(ToString::to_string),
    })
}

/// The flags rendering of `value`.
pub(crate) fn flags_text(table: &MemberTable, ops: &OperatorSet, value: RawValue) -> String {
    match decompose(table, ops, value) {
        Some(names) if !names.is_empty() => names.join(FLAGS_SEPARATOR),
        // Nothing matched and nothing is left over, so `value` is zero.
        Some(_) => match table.get(value) {
            Some(zero) => zero.name().to_owned(),
            None => ops.format(value, NumberStyle::Decimal),
        },
        None => ops.format(value, NumberStyle::Decimal),
    }
}

/// Greedy decomposition of `value` into member names, ascending.
///
/// `None` when some bits of `value` are not covered by the matched members.
fn decompose<'t>(
    table: &'t MemberTable,
    ops: &OperatorSet,
    value: RawValue,
) -> Option<SmallVec<[&'t str; 8]>> {
    let mut residue = value;
    let mut names: SmallVec<[&'t str; 8]> = SmallVec::new();

    for member in table.unique().rev() {
        let bits = member.value();
        if bits.is_zero() {
            continue;
        }
        if ops.equals(ops.and(bits, residue), bits) {
            names.push(member.name());
            residue = ops.and(residue, ops.not(bits));
        }
    }

    if !residue.is_zero() {
        return None;
    }
    names.reverse();
    Some(names)
}

#[cfg(test)]
mod tests;
