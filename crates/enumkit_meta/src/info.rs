//! Typed handles over cached metadata.
//!
//! `EnumInfo<E>` pairs an enum type's `&'static EnumMetadata` with the two
//! conversions between `E` and `RawValue`. It is `Copy` and lock-free to
//! use; obtaining one is a single shard read once the type is built.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use enumkit_ops::{Integral, IntegralKind, NativeInt, RawValue};

use crate::cache::{self, Converters};
use crate::declaration::Enum;
use crate::error::EnumResult;
use crate::format::{EnumFormat, FormatSpec};
use crate::metadata::RawInput;
use crate::parse::ParseOptions;
use crate::table::Member;
use crate::{Attributes, EnumMetadata};

/// Build (if needed) and return the metadata of `E`.
///
/// After this, `unchecked::info::<E>()` succeeds.
pub fn register<E: Enum>() -> &'static EnumMetadata {
    cache::global().get_or_build::<E>().metadata()
}

/// Typed access to the metadata of `E`.
pub struct EnumInfo<E> {
    metadata: &'static EnumMetadata,
    convert: Converters<E>,
}

impl<E> Clone for EnumInfo<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumInfo<E> {}

impl<E> fmt::Debug for EnumInfo<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumInfo").field(self.metadata).finish()
    }
}

impl<E: Enum> EnumInfo<E> {
    /// The handle for `E`, building its metadata on first use.
    pub fn get() -> Self {
        EnumInfo {
            metadata: register::<E>(),
            convert: Converters::of(),
        }
    }
}

impl<E: Copy + 'static> EnumInfo<E> {
    pub(crate) fn from_parts(metadata: &'static EnumMetadata, convert: Converters<E>) -> Self {
        EnumInfo { metadata, convert }
    }

    /// The kind-erased facade behind this handle.
    #[inline]
    pub fn metadata(self) -> &'static EnumMetadata {
        self.metadata
    }

    #[inline]
    pub fn type_name(self) -> &'static str {
        self.metadata.type_name()
    }

    #[inline]
    pub fn kind(self) -> IntegralKind {
        self.metadata.kind()
    }

    #[inline]
    pub fn is_flags(self) -> bool {
        self.metadata.is_flags()
    }

    #[inline]
    pub fn is_contiguous(self) -> bool {
        self.metadata.is_contiguous()
    }

    #[inline]
    pub fn to_raw(self, value: E) -> RawValue {
        (self.convert.to_raw)(value)
    }

    #[inline]
    pub fn value_from_raw(self, raw: RawValue) -> E {
        (self.convert.from_raw)(raw)
    }

    // Coercion

    /// Coerce an integer or text; see [`EnumMetadata::to_object`].
    pub fn to_object<'a>(self, raw: impl Into<RawInput<'a>>, validate: bool) -> EnumResult<E> {
        self.metadata
            .to_object(raw.into(), validate)
            .map(|raw| self.value_from_raw(raw))
    }

    pub fn try_to_object<'a>(self, raw: impl Into<RawInput<'a>>, validate: bool) -> Option<E> {
        self.to_object(raw, validate).ok()
    }

    pub fn to_object_any(self, raw: &dyn Any, validate: bool) -> EnumResult<E> {
        self.metadata
            .to_object_any(raw, validate)
            .map(|raw| self.value_from_raw(raw))
    }

    // Validation

    #[inline]
    pub fn is_defined(self, value: E) -> bool {
        self.metadata.is_defined(self.to_raw(value))
    }

    #[inline]
    pub fn is_valid(self, value: E) -> bool {
        self.metadata.is_valid(self.to_raw(value))
    }

    pub fn validate(self, value: E, label: &str) -> EnumResult<E> {
        self.metadata.validate(self.to_raw(value), label).map(|_| value)
    }

    // Formatting

    pub fn as_string(self, value: E) -> String {
        self.metadata.as_string(self.to_raw(value))
    }

    pub fn format(self, value: E, spec: &str) -> EnumResult<String> {
        self.metadata.format(self.to_raw(value), spec)
    }

    pub fn format_spec(self, value: E, spec: FormatSpec) -> String {
        self.metadata.format_spec(self.to_raw(value), spec)
    }

    pub fn as_string_with(self, value: E, formats: &[EnumFormat]) -> Option<String> {
        self.metadata.as_string_with(self.to_raw(value), formats)
    }

    // Conversion

    #[inline]
    pub fn underlying(self, value: E) -> NativeInt {
        self.metadata.underlying(self.to_raw(value))
    }

    /// Convert to another integer type, failing with `Overflow` on loss.
    pub fn convert<N: Integral>(self, value: E) -> EnumResult<N> {
        self.metadata.convert(self.to_raw(value))
    }

    // Comparison

    #[inline]
    pub fn equals(self, a: E, b: E) -> bool {
        self.metadata.equals(self.to_raw(a), self.to_raw(b))
    }

    #[inline]
    pub fn compare(self, a: E, b: E) -> Ordering {
        self.metadata.compare(self.to_raw(a), self.to_raw(b))
    }

    // Members

    pub fn member(self, value: E) -> Option<EnumMember<E>> {
        self.metadata
            .member(self.to_raw(value))
            .map(|member| self.wrap(member))
    }

    pub fn member_by_name(self, name: &str, ignore_case: bool) -> Option<EnumMember<E>> {
        self.metadata
            .member_by_name(name, ignore_case)
            .map(|member| self.wrap(member))
    }

    pub fn name(self, value: E) -> Option<&'static str> {
        self.metadata.name(self.to_raw(value))
    }

    pub fn member_count(self, unique: bool) -> usize {
        self.metadata.member_count(unique)
    }

    pub fn members(self, unique: bool) -> impl DoubleEndedIterator<Item = EnumMember<E>> {
        self.metadata
            .members(unique)
            .map(move |member| self.wrap(member))
    }

    pub fn names(self, unique: bool) -> impl DoubleEndedIterator<Item = &'static str> {
        self.metadata.names(unique)
    }

    pub fn values(self, unique: bool) -> impl DoubleEndedIterator<Item = E> {
        self.metadata
            .values(unique)
            .map(move |raw| self.value_from_raw(raw))
    }

    /// Every member bit combined.
    pub fn all_flags(self) -> E {
        self.value_from_raw(self.metadata.all_flags())
    }

    fn wrap(self, member: &'static Member) -> EnumMember<E> {
        EnumMember {
            member,
            from_raw: self.convert.from_raw,
        }
    }

    // Attributes

    pub fn attributes(self, value: E) -> Option<&'static Attributes> {
        self.metadata.attributes(self.to_raw(value))
    }

    pub fn attribute<A: Any>(self, value: E) -> Option<&'static A> {
        self.metadata.attribute::<A>(self.to_raw(value))
    }

    pub fn has_attribute<A: Any>(self, value: E) -> bool {
        self.metadata.has_attribute::<A>(self.to_raw(value))
    }

    // Parsing

    pub fn parse(self, text: &str, options: &ParseOptions) -> EnumResult<E> {
        self.metadata
            .parse(text, options)
            .map(|raw| self.value_from_raw(raw))
    }

    pub fn try_parse(self, text: &str, options: &ParseOptions) -> Option<E> {
        self.parse(text, options).ok()
    }

    pub fn parse_member(self, text: &str, options: &ParseOptions) -> EnumResult<EnumMember<E>> {
        self.metadata
            .parse_member(text, options)
            .map(|member| self.wrap(member))
    }

    pub fn try_parse_member(self, text: &str, options: &ParseOptions) -> Option<EnumMember<E>> {
        self.parse_member(text, options).ok()
    }
}

/// A member of `E`, viewed with its typed value.
pub struct EnumMember<E> {
    member: &'static Member,
    from_raw: fn(RawValue) -> E,
}

impl<E> Clone for EnumMember<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumMember<E> {}

impl<E> EnumMember<E> {
    #[inline]
    pub fn name(self) -> &'static str {
        self.member.name()
    }

    #[inline]
    pub fn value(self) -> E {
        (self.from_raw)(self.member.value())
    }

    #[inline]
    pub fn raw_value(self) -> RawValue {
        self.member.value()
    }

    #[inline]
    pub fn attributes(self) -> &'static Attributes {
        self.member.attributes()
    }

    pub fn attribute<A: Any>(self) -> Option<&'static A> {
        self.member.attributes().get::<A>()
    }

    /// Position of the member in its type's declaration.
    #[inline]
    pub fn declaration_index(self) -> usize {
        self.member.declaration_index()
    }

    /// The untyped member record.
    #[inline]
    pub fn as_member(self) -> &'static Member {
        self.member
    }
}

impl<E> PartialEq for EnumMember<E> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.member, other.member)
    }
}

impl<E> Eq for EnumMember<E> {}

impl<E> fmt::Debug for EnumMember<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumMember")
            .field("name", &self.member.name())
            .field("value", &self.member.value())
            .finish()
    }
}

impl<E> fmt::Display for EnumMember<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.member.name())
    }
}

/// Entry points for callers that cannot name an `Enum` bound.
pub mod unchecked {
    use std::any::{type_name, TypeId};

    use super::EnumInfo;
    use crate::cache;
    use crate::error::{self, EnumResult};

    /// The handle for `T`, if `T` is a registered enum type.
    ///
    /// A type becomes registered the first time any typed entry point
    /// (`register`, `EnumInfo::get`, or a macro-generated impl) touches it.
    /// Anything else fails with `InvalidArgument`.
    pub fn info<T: Copy + 'static>() -> EnumResult<EnumInfo<T>> {
        let not_an_enum = || error::not_an_enum(type_name::<T>());
        let entry = cache::global()
            .get(TypeId::of::<T>())
            .ok_or_else(not_an_enum)?;
        let convert = entry.converters::<T>().copied().ok_or_else(not_an_enum)?;
        Ok(EnumInfo::from_parts(entry.metadata(), convert))
    }
}
