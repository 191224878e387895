//! Member table: the sorted, indexed, immutable members of one enum type.
//!
//! # Layout
//!
//! - `members`: sorted ascending by value with the kind's comparison; the
//!   sort is stable, so equal values keep declaration order
//! - `by_name`: exact-case name index
//! - `by_folded_name`: lower-cased name index, first declared name wins
//! - `distinct`, `is_contiguous`, `flags_mask`: derived once at build time
//!
//! The unique-valued view (first member of each distinct value) is a
//! filtered traversal of `members`, never a second copy.

use std::collections::hash_map::Entry;

use enumkit_ops::{OperatorSet, RawValue};
use rustc_hash::FxHashMap;

use crate::declaration::DeclaredMember;
use crate::Attributes;

/// One member of an enum type.
#[derive(Debug)]
pub struct Member {
    name: Box<str>,
    value: RawValue,
    attributes: Attributes,
    declared_at: usize,
}

impl Member {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> RawValue {
        self.value
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Position of this member in the original declaration.
    #[inline]
    pub fn declaration_index(&self) -> usize {
        self.declared_at
    }
}

/// Sorted, indexed member storage for one enum type.
#[derive(Debug)]
pub struct MemberTable {
    ops: &'static OperatorSet,
    members: Vec<Member>,
    by_name: FxHashMap<Box<str>, usize>,
    by_folded_name: FxHashMap<String, usize>,
    distinct: usize,
    is_contiguous: bool,
    flags_mask: RawValue,
}

impl MemberTable {
    /// Sort and index `declared`.
    #[tracing::instrument(level = "debug", skip_all, fields(count = declared.len()))]
    pub fn build(declared: Vec<DeclaredMember>, ops: &'static OperatorSet) -> Self {
        let mut members: Vec<Member> = declared
            .into_iter()
            .enumerate()
            .map(|(declared_at, m)| Member {
                name: m.name,
                value: m.value,
                attributes: m.attributes,
                declared_at,
            })
            .collect();
        members.sort_by(|a, b| ops.compare(a.value, b.value));

        // Index in declaration order so the first declared name wins a collision.
        let mut by_declaration: Vec<usize> = (0..members.len()).collect();
        by_declaration.sort_by_key(|&pos| members[pos].declared_at);

        let mut by_name = FxHashMap::default();
        let mut by_folded_name = FxHashMap::default();
        for pos in by_declaration {
            let name = &members[pos].name;
            match by_name.entry(name.clone()) {
                Entry::Occupied(_) => {
                    tracing::warn!(member = %name, "duplicate member name; first declaration wins");
                }
                Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
            }
            by_folded_name.entry(fold(name)).or_insert(pos);
        }

        let distinct = members
            .windows(2)
            .filter(|pair| !ops.equals(pair[0].value, pair[1].value))
            .count()
            + usize::from(!members.is_empty());

        let is_contiguous = match (members.first(), members.last()) {
            (Some(first), Some(last)) => {
                let span = ops
                    .distance(first.value, last.value)
                    .and_then(|d| d.checked_add(1));
                span.is_some() && span == u64::try_from(distinct).ok()
            }
            _ => false,
        };

        let flags_mask = members
            .iter()
            .fold(RawValue::ZERO, |mask, m| ops.or(mask, m.value));

        MemberTable {
            ops,
            members,
            by_name,
            by_folded_name,
            distinct,
            is_contiguous,
            flags_mask,
        }
    }

    /// Number of members, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Number of distinct values.
    #[inline]
    pub fn distinct_len(&self) -> usize {
        self.distinct
    }

    /// All members, ascending by value.
    #[inline]
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The first declared member of each distinct value, ascending.
    pub fn unique(&self) -> UniqueMembers<'_> {
        UniqueMembers {
            ops: self.ops,
            inner: self.members.iter(),
            front: None,
        }
    }

    /// True iff the distinct values form one gap-free run. False when empty.
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.is_contiguous
    }

    /// Bitwise OR of every member value.
    #[inline]
    pub fn flags_mask(&self) -> RawValue {
        self.flags_mask
    }

    #[inline]
    pub fn min_value(&self) -> Option<RawValue> {
        self.members.first().map(Member::value)
    }

    #[inline]
    pub fn max_value(&self) -> Option<RawValue> {
        self.members.last().map(Member::value)
    }

    /// The first declared member with `value`, by binary search.
    pub fn get(&self, value: RawValue) -> Option<&Member> {
        let pos = self
            .members
            .partition_point(|m| self.ops.greater_than(value, m.value));
        self.members
            .get(pos)
            .filter(|m| self.ops.equals(m.value, value))
    }

    /// Whether some member has exactly `value`.
    #[inline]
    pub fn contains(&self, value: RawValue) -> bool {
        self.get(value).is_some()
    }

    /// Look up by name. An exact match always wins; with `ignore_case` a
    /// case-insensitive match is tried next.
    pub fn get_by_name(&self, name: &str, ignore_case: bool) -> Option<&Member> {
        if let Some(&pos) = self.by_name.get(name) {
            return Some(&self.members[pos]);
        }
        if ignore_case {
            return self
                .by_folded_name
                .get(&fold(name))
                .map(|&pos| &self.members[pos]);
        }
        None
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

/// Iterator over the first declared member of each distinct value.
#[derive(Clone, Debug)]
pub struct UniqueMembers<'a> {
    ops: &'static OperatorSet,
    inner: std::slice::Iter<'a, Member>,
    /// Value of the last member yielded from the front.
    front: Option<RawValue>,
}

impl<'a> Iterator for UniqueMembers<'a> {
    type Item = &'a Member;

    fn next(&mut self) -> Option<&'a Member> {
        loop {
            let member = self.inner.next()?;
            if self
                .front
                .is_some_and(|v| self.ops.equals(v, member.value))
            {
                continue;
            }
            self.front = Some(member.value);
            return Some(member);
        }
    }
}

impl<'a> DoubleEndedIterator for UniqueMembers<'a> {
    fn next_back(&mut self) -> Option<&'a Member> {
        let mut member = self.inner.next_back()?;
        // Walk back to the first member of this run.
        while let Some(prev) = self.inner.as_slice().last() {
            if !self.ops.equals(prev.value, member.value) {
                break;
            }
            member = self.inner.next_back()?;
        }
        // The run was already entered from the front.
        if self
            .front
            .is_some_and(|v| self.ops.equals(v, member.value))
        {
            return None;
        }
        Some(member)
    }
}
