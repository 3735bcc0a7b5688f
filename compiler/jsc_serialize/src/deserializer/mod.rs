//! Pool entries to Colors.
//!
//! Resolution is lazy: nothing is built until a pointer is asked for, and
//! each offset is built at most once per deserializer. An object's
//! supertypes, prototype and instance type are resolved on the way, so
//! asking for one entry may materialize a large part of the pool.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use jsc_colors::{Color, DebugInfo, ObjectColor};

use crate::stack::ensure_sufficient_stack;
use crate::{
    InvalidSerializedFormat, NativeType, ObjectType, Type, TypePointer, TypePool, UnionType,
};

/// Id of the Color every native object type maps to.
const TOP_OBJECT_ID: &str = "_nativeObject_";

/// Progress of one pool offset.
enum Slot {
    Unvisited,
    /// Being built further up the stack. Meeting it again means a cycle.
    InProgress,
    Resolved(Color),
}

/// Reads Colors out of a [`TypePool`].
///
/// # Interior Mutability
///
/// Slots live in a `RefCell` so that [`pointer_to_color`](Self::pointer_to_color)
/// can take `&self` while memoizing. No borrow is held across the recursive
/// resolution of an entry.
pub struct ColorDeserializer<'pool> {
    type_pool: &'pool TypePool,
    /// Direct supertypes of each object offset, in edge order.
    disambiguation_edges: FxHashMap<u32, SmallVec<[TypePointer; 2]>>,
    slots: RefCell<Vec<Slot>>,
    top_object_color: Color,
}

impl<'pool> ColorDeserializer<'pool> {
    /// Prepare to read `type_pool`.
    ///
    /// Edges are checked here, before any entry is resolved: both ends of
    /// every edge must be pool offsets. Offsets themselves are only
    /// bounds-checked when they are dereferenced.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(types = type_pool.types.len(), edges = type_pool.disambiguation_edges.len())
    )]
    pub fn build_from_type_pool(
        type_pool: &'pool TypePool,
    ) -> Result<Self, InvalidSerializedFormat> {
        let mut disambiguation_edges: FxHashMap<u32, SmallVec<[TypePointer; 2]>> =
            FxHashMap::default();
        for edge in &type_pool.disambiguation_edges {
            match (edge.subtype, edge.supertype) {
                (TypePointer::PoolOffset(subtype), TypePointer::PoolOffset(_)) => {
                    disambiguation_edges
                        .entry(subtype)
                        .or_default()
                        .push(edge.supertype);
                }
                (subtype, supertype) => {
                    return Err(reject(InvalidSerializedFormat::NonOffsetEdge {
                        subtype,
                        supertype,
                    }));
                }
            }
        }

        let slots = type_pool.types.iter().map(|_| Slot::Unvisited).collect();
        Ok(Self {
            type_pool,
            disambiguation_edges,
            slots: RefCell::new(slots),
            top_object_color: ObjectColor::builder(TOP_OBJECT_ID)
                .with_invalidating(true)
                .build(),
        })
    }

    pub fn type_pool(&self) -> &'pool TypePool {
        self.type_pool
    }

    /// The Color a pointer refers to.
    ///
    /// Asking again for the same pointer returns the same Color, sharing its
    /// allocation. After an error the failed entries are left unresolved;
    /// asking for them again reports the same error.
    pub fn pointer_to_color(&self, pointer: TypePointer) -> Result<Color, InvalidSerializedFormat> {
        match pointer {
            TypePointer::Native(raw) => self.native_color(raw),
            TypePointer::PoolOffset(offset) => self.offset_to_color(pointer, offset),
            TypePointer::Unset => Err(reject(InvalidSerializedFormat::UnsetPointer)),
        }
    }

    /// Every entry of the pool, in offset order.
    pub fn colors(&self) -> Result<Vec<Color>, InvalidSerializedFormat> {
        let len = u32::try_from(self.type_pool.types.len()).unwrap_or(u32::MAX);
        (0..len)
            .map(|offset| self.pointer_to_color(TypePointer::pool_offset(offset)))
            .collect()
    }

    fn native_color(&self, raw: i32) -> Result<Color, InvalidSerializedFormat> {
        let Some(native) = NativeType::from_raw(raw) else {
            return Err(reject(InvalidSerializedFormat::UnrecognizedNativeType { raw }));
        };
        Ok(match native {
            NativeType::NumberType => Color::NUMBER,
            NativeType::StringType => Color::STRING,
            NativeType::BooleanType => Color::BOOLEAN,
            NativeType::SymbolType => Color::SYMBOL,
            NativeType::BigintType => Color::BIGINT,
            NativeType::NullOrVoidType => Color::NULL_OR_VOID,
            NativeType::UnknownType => Color::UNKNOWN,
            NativeType::TopObject => self.top_object_color.clone(),
        })
    }

    fn offset_to_color(
        &self,
        pointer: TypePointer,
        offset: u32,
    ) -> Result<Color, InvalidSerializedFormat> {
        let index = offset as usize;
        let Some(ty) = self.type_pool.types.get(index) else {
            return Err(reject(InvalidSerializedFormat::OffsetOutOfBounds {
                pointer,
                pool_size: self.type_pool.types.len(),
            }));
        };

        {
            let mut slots = self.slots.borrow_mut();
            let slot = &mut slots[index];
            match *slot {
                Slot::Resolved(ref color) => return Ok(color.clone()),
                Slot::InProgress => {
                    return Err(reject(InvalidSerializedFormat::Cycle { offset }));
                }
                Slot::Unvisited => *slot = Slot::InProgress,
            }
        }

        let result = ensure_sufficient_stack(|| self.create_color(offset, ty));

        self.slots.borrow_mut()[index] = match &result {
            Ok(color) => {
                tracing::trace!(offset, %color, "resolved pool entry");
                Slot::Resolved(color.clone())
            }
            Err(_) => Slot::Unvisited,
        };
        result
    }

    fn create_color(&self, offset: u32, ty: &Type) -> Result<Color, InvalidSerializedFormat> {
        match ty {
            Type::Object(object) => self.create_object_color(offset, object),
            Type::Union(union) => self.create_union_color(offset, union),
            Type::Unset => Err(reject(InvalidSerializedFormat::UnsetType { offset })),
        }
    }

    fn create_object_color(
        &self,
        offset: u32,
        object: &ObjectType,
    ) -> Result<Color, InvalidSerializedFormat> {
        let supertypes = match self.disambiguation_edges.get(&offset) {
            Some(supertypes) => supertypes
                .iter()
                .map(|&supertype| self.pointer_to_color(supertype))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let mut builder = ObjectColor::builder(object.uuid.clone())
            .with_invalidating(object.is_invalidating)
            .with_disambiguation_supertypes(supertypes);
        if let Some(prototype) = object.prototype {
            builder = builder.with_prototype(self.pointer_to_color(prototype)?);
        }
        if let Some(instance) = object.instance_type {
            builder = builder.with_instance_color(self.pointer_to_color(instance)?);
        }
        if let Some(debug_info) = &object.debug_info {
            builder = builder.with_debug_info(DebugInfo {
                filename: debug_info.filename.clone(),
                class_name: debug_info.class_name.clone(),
            });
        }
        Ok(builder.build())
    }

    fn create_union_color(
        &self,
        offset: u32,
        union: &UnionType,
    ) -> Result<Color, InvalidSerializedFormat> {
        let members = &union.union_members;
        if members.len() < 2 {
            return Err(reject(InvalidSerializedFormat::UnionTooSmall {
                offset,
                members: members.len(),
            }));
        }

        let alternates = members
            .iter()
            .map(|&member| self.pointer_to_color(member))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Color::union(alternates))
    }
}

fn reject(error: InvalidSerializedFormat) -> InvalidSerializedFormat {
    tracing::debug!(%error, "rejecting type pool");
    error
}

#[cfg(test)]
mod tests;
