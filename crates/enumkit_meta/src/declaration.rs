//! Member declaration source.
//!
//! A `Declaration` is the raw input the member table is built from: the
//! type's name, its integral kind, the flags marker and the members in
//! declaration order. It is produced once per enum type, either by hand
//! through `DeclarationBuilder` or by an `Enum` impl (usually generated by
//! `enum_type!`).

use std::marker::PhantomData;

use enumkit_ops::{Integral, IntegralKind, RawValue};

use crate::Attributes;

/// One declared member before sorting.
#[derive(Debug)]
pub struct DeclaredMember {
    pub(crate) name: Box<str>,
    pub(crate) value: RawValue,
    pub(crate) attributes: Attributes,
}

/// The complete declaration of one enum type.
#[derive(Debug)]
pub struct Declaration {
    pub(crate) type_name: &'static str,
    pub(crate) kind: IntegralKind,
    pub(crate) is_flags: bool,
    pub(crate) members: Vec<DeclaredMember>,
}

impl Declaration {
    /// Start declaring a type whose underlying representation is `T`.
    pub fn builder<T: Integral>(type_name: &'static str) -> DeclarationBuilder<T> {
        DeclarationBuilder {
            type_name,
            is_flags: false,
            members: Vec::new(),
            provider: None,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub fn kind(&self) -> IntegralKind {
        self.kind
    }

    #[inline]
    pub fn is_flags(&self) -> bool {
        self.is_flags
    }

    /// Number of declared members, duplicates included.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Supplies attribute records for a member, by member name.
///
/// Consulted once per member when the declaration is built.
pub trait AttributeProvider: Send + Sync {
    fn attributes(&self, member: &str) -> Attributes;
}

impl<F> AttributeProvider for F
where
    F: Fn(&str) -> Attributes + Send + Sync,
{
    fn attributes(&self, member: &str) -> Attributes {
        self(member)
    }
}

/// Builder for a `Declaration` over the native type `T`.
///
/// Typing the builder by `T` keeps the declared kind and the member values
/// in agreement.
#[must_use]
pub struct DeclarationBuilder<T> {
    type_name: &'static str,
    is_flags: bool,
    members: Vec<DeclaredMember>,
    provider: Option<Box<dyn AttributeProvider>>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Integral> DeclarationBuilder<T> {
    /// Override the type name used in messages.
    pub fn named(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    /// Mark (or unmark) the type as flags-style.
    pub fn flags(mut self, is_flags: bool) -> Self {
        self.is_flags = is_flags;
        self
    }

    /// Declare a member with no attributes.
    pub fn member(self, name: impl Into<Box<str>>, value: T) -> Self {
        self.member_with(name, value, Attributes::new())
    }

    /// Declare a member with attributes.
    pub fn member_with(
        mut self,
        name: impl Into<Box<str>>,
        value: T,
        attributes: Attributes,
    ) -> Self {
        self.members.push(DeclaredMember {
            name: name.into(),
            value: value.to_raw(),
            attributes,
        });
        self
    }

    /// Attach an attribute provider, consulted for every member at `build`.
    pub fn attribute_provider(mut self, provider: impl AttributeProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Finish the declaration.
    pub fn build(self) -> Declaration {
        let mut members = self.members;
        if let Some(provider) = &self.provider {
            for member in &mut members {
                let extra = provider.attributes(&member.name);
                member.attributes.extend(extra);
            }
        }
        Declaration {
            type_name: self.type_name,
            kind: T::KIND,
            is_flags: self.is_flags,
            members,
        }
    }
}

/// An enum-like type: a named set of values over one native integer type.
///
/// This is the capability bound for the typed entry points. Values need not
/// be declared members; flags combinations and out-of-table values are
/// ordinary values of the type.
pub trait Enum: Copy + Send + Sync + 'static {
    /// The native representation.
    type Underlying: Integral;

    fn to_underlying(self) -> Self::Underlying;

    fn from_underlying(value: Self::Underlying) -> Self;

    /// Add this type's members (and flags marker) to `decl`.
    fn declare(decl: DeclarationBuilder<Self::Underlying>) -> DeclarationBuilder<Self::Underlying>;
}

/// Fetch the declaration of `E`.
pub(crate) fn declaration_of<E: Enum>() -> Declaration {
    E::declare(Declaration::builder::<E::Underlying>(std::any::type_name::<E>())).build()
}
