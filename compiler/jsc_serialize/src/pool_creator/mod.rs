//! Building a pool one entry at a time.
//!
//! Entries are reserved before they are written. A writer that reserves an
//! object, then recurses into the object's prototype, and from there reaches
//! the object again, gets the already-issued pointer back instead of looping.
//! Cycles in the source graph therefore become offset references in the pool.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::{SubtypingEdge, Type, TypePointer, TypePool};

/// A key that compares by address, not by value.
///
/// Two structurally equal source types can still be different types (two
/// anonymous object literals, two unions declared in different places), and
/// each needs its own pool entry. `IdentityKey` ignores whatever equality
/// `T` has and only considers which node it points at.
pub struct IdentityKey<'a, T>(&'a T);

impl<'a, T> IdentityKey<'a, T> {
    #[inline]
    pub fn new(node: &'a T) -> Self {
        Self(node)
    }
}

impl<T> Clone for IdentityKey<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for IdentityKey<'_, T> {}

impl<T> PartialEq for IdentityKey<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl<T> Eq for IdentityKey<'_, T> {}

impl<T> Hash for IdentityKey<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(self.0, state);
    }
}

impl<T: fmt::Debug> fmt::Debug for IdentityKey<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({:p}, {:?})", self.0, self.0)
    }
}

/// Outcome of [`TypePoolCreator::reserve`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reservation {
    /// The key was seen before; its entry is (or is being) written already.
    Existing(TypePointer),
    /// A new offset was allocated; the caller must [`fill`](TypePoolCreator::fill) it.
    Fresh(TypePointer),
}

impl Reservation {
    #[inline]
    pub fn pointer(self) -> TypePointer {
        match self {
            Reservation::Existing(pointer) | Reservation::Fresh(pointer) => pointer,
        }
    }
}

/// Allocates pool offsets by key and collects disambiguation edges.
///
/// Offsets are handed out sequentially and never change. An entry may be
/// pending (reserved, not yet filled) while other entries that point at it
/// are written; only [`into_type_pool`](Self::into_type_pool) requires every
/// entry to be complete.
pub struct TypePoolCreator<K> {
    offsets: FxHashMap<K, u32>,
    /// `None` while an entry is reserved but not yet written.
    types: Vec<Option<Type>>,
    edges: Vec<SubtypingEdge>,
    seen_edges: FxHashSet<SubtypingEdge>,
}

impl<K: Eq + Hash> TypePoolCreator<K> {
    pub fn new() -> Self {
        Self {
            offsets: FxHashMap::default(),
            types: Vec::new(),
            edges: Vec::new(),
            seen_edges: FxHashSet::default(),
        }
    }

    /// Return the pointer issued for `key`, or allocate the next offset.
    ///
    /// # Panics
    /// Panics if the pool outgrows `u32` offsets.
    pub fn reserve(&mut self, key: K) -> Reservation {
        if let Some(&offset) = self.offsets.get(&key) {
            return Reservation::Existing(TypePointer::PoolOffset(offset));
        }

        let offset = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type pool exceeded {} entries", u32::MAX));
        self.types.push(None);
        self.offsets.insert(key, offset);
        tracing::trace!(offset, "reserved pool entry");
        Reservation::Fresh(TypePointer::PoolOffset(offset))
    }

    /// Write the entry for a pointer returned as [`Reservation::Fresh`].
    ///
    /// # Panics
    /// Panics if `pointer` was not reserved here or was already filled.
    pub fn fill(&mut self, pointer: TypePointer, ty: Type) {
        let slot = pointer
            .as_pool_offset()
            .and_then(|offset| self.types.get_mut(offset as usize));
        match slot {
            Some(slot) if slot.is_none() => *slot = Some(ty),
            Some(_) => panic!("pool entry {pointer} was filled twice"),
            None => panic!("pool entry {pointer} was never reserved"),
        }
    }

    /// Record that `subtype` sits directly below `supertype`.
    ///
    /// Registering the same pair again has no effect; edges keep the order in
    /// which pairs were first seen.
    ///
    /// # Panics
    /// Panics if either side is not a pool offset.
    pub fn add_disambiguation_edge(&mut self, subtype: TypePointer, supertype: TypePointer) {
        assert!(
            subtype.as_pool_offset().is_some() && supertype.as_pool_offset().is_some(),
            "disambiguation edges connect pool entries only, found {subtype} <: {supertype}",
        );
        let edge = SubtypingEdge { subtype, supertype };
        if self.seen_edges.insert(edge) {
            self.edges.push(edge);
        }
    }

    /// Number of offsets handed out so far, pending ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Finish the pool.
    ///
    /// # Panics
    /// Panics if an entry was reserved but never filled.
    #[tracing::instrument(level = "debug", skip_all, fields(types = self.types.len(), edges = self.edges.len()))]
    pub fn into_type_pool(self) -> TypePool {
        let types = self
            .types
            .into_iter()
            .enumerate()
            .map(|(offset, slot)| {
                slot.unwrap_or_else(|| panic!("pool entry {offset} was reserved but never filled"))
            })
            .collect();

        TypePool {
            types,
            disambiguation_edges: self.edges,
        }
    }
}

impl<K: Eq + Hash> Default for TypePoolCreator<K> {
    fn default() -> Self {
        Self::new()
    }
}
