//! Opaque per-member attribute records.
//!
//! Attributes are captured once when a member is declared and never
//! refreshed. Records are arbitrary `'static` values; queries select them by
//! type, in declaration order.

use std::any::Any;
use std::borrow::Cow;
use std::fmt;

/// Ordered set of attribute records attached to one member.
#[derive(Default)]
pub struct Attributes {
    records: Vec<Box<dyn Any + Send + Sync>>,
}

impl Attributes {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, builder style.
    #[must_use]
    pub fn with<A: Any + Send + Sync>(mut self, attribute: A) -> Self {
        self.push(attribute);
        self
    }

    /// Append a record.
    pub fn push<A: Any + Send + Sync>(&mut self, attribute: A) {
        self.records.push(Box::new(attribute));
    }

    /// Append every record of `other`, keeping order.
    pub fn extend(&mut self, other: Attributes) {
        self.records.extend(other.records);
    }

    /// The first record of type `A`.
    pub fn get<A: Any>(&self) -> Option<&A> {
        self.all::<A>().next()
    }

    /// Whether any record has type `A`.
    pub fn has<A: Any>(&self) -> bool {
        self.get::<A>().is_some()
    }

    /// Every record of type `A`, in declaration order.
    pub fn all<A: Any>(&self) -> impl Iterator<Item = &A> + '_ {
        self.records.iter().filter_map(|r| r.downcast_ref::<A>())
    }

    /// Every record, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Any + Send + Sync)> + '_ {
        self.records.iter().map(|r| &**r)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attributes")
            .field("len", &self.records.len())
            .field("description", &self.get::<Description>())
            .finish()
    }
}

/// Human-readable description of a member.
///
/// Used by `EnumFormat::Description` for both formatting and parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Description(Cow<'static, str>);

impl Description {
    pub fn new(text: impl Into<Cow<'static, str>>) -> Self {
        Description(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
