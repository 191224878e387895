//! Process-wide metadata cache.
//!
//! Keyed by `TypeId`, split over 16 `RwLock` shards. Entries are leaked to
//! `'static` on insert, so a lookup hands out a plain reference and no lock
//! is held while the metadata is used.
//!
//! Construction happens outside any lock. When two threads race on the
//! first build of the same type, both build, the first insert wins and the
//! other result is dropped; since building is a pure function of the
//! declaration, the two are indistinguishable.

use std::any::{Any, TypeId};
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use enumkit_ops::{Integral, RawValue};
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHasher};

use crate::declaration::{declaration_of, Enum};
use crate::EnumMetadata;

const SHARD_COUNT: usize = 16;

/// Conversions between an enum type and its kind-erased values.
pub(crate) struct Converters<T> {
    pub(crate) to_raw: fn(T) -> RawValue,
    pub(crate) from_raw: fn(RawValue) -> T,
}

impl<T> Clone for Converters<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Converters<T> {}

impl<E: Enum> Converters<E> {
    pub(crate) fn of() -> Self {
        Converters {
            to_raw: enum_to_raw::<E>,
            from_raw: enum_from_raw::<E>,
        }
    }
}

fn enum_to_raw<E: Enum>(value: E) -> RawValue {
    value.to_underlying().to_raw()
}

fn enum_from_raw<E: Enum>(raw: RawValue) -> E {
    E::from_underlying(E::Underlying::from_raw(raw))
}

/// One cached type: its metadata plus type-erased `Converters<E>`.
pub(crate) struct Entry {
    metadata: EnumMetadata,
    converters: Box<dyn Any + Send + Sync>,
}

impl Entry {
    fn build<E: Enum>() -> Self {
        Entry {
            metadata: EnumMetadata::build(declaration_of::<E>()),
            converters: Box::new(Converters::<E>::of()),
        }
    }

    #[inline]
    pub(crate) fn metadata(&self) -> &EnumMetadata {
        &self.metadata
    }

    /// The converters, if this entry was built for `T`.
    pub(crate) fn converters<T: 'static>(&self) -> Option<&Converters<T>> {
        self.converters.downcast_ref()
    }
}

type Shard = FxHashMap<TypeId, &'static Entry>;

/// Sharded insert-once map from type identity to metadata.
pub(crate) struct MetadataCache {
    shards: [RwLock<Shard>; SHARD_COUNT],
}

impl MetadataCache {
    pub(crate) fn new() -> Self {
        MetadataCache {
            shards: std::array::from_fn(|_| RwLock::new(FxHashMap::default())),
        }
    }

    #[inline]
    fn shard(&self, id: TypeId) -> &RwLock<Shard> {
        let mut hasher = FxHasher::default();
        id.hash(&mut hasher);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "only the low bits select a shard"
        )]
        let index = hasher.finish() as usize % SHARD_COUNT;
        &self.shards[index]
    }

    /// The entry for `id`, if some typed access already built it.
    pub(crate) fn get(&self, id: TypeId) -> Option<&'static Entry> {
        self.shard(id).read().get(&id).copied()
    }

    /// The entry for `E`, building it on first use.
    pub(crate) fn get_or_build<E: Enum>(&self) -> &'static Entry {
        let id = TypeId::of::<E>();
        if let Some(entry) = self.get(id) {
            return entry;
        }

        let built = Entry::build::<E>();

        let mut guard = self.shard(id).write();
        if let Some(&entry) = guard.get(&id) {
            tracing::trace!(type_name = built.metadata.type_name(), "lost first-build race");
            return entry;
        }
        let entry: &'static Entry = Box::leak(Box::new(built));
        guard.insert(id, entry);
        entry
    }
}

/// The process-wide cache.
pub(crate) fn global() -> &'static MetadataCache {
    static CACHE: OnceLock<MetadataCache> = OnceLock::new();
    CACHE.get_or_init(MetadataCache::new)
}
