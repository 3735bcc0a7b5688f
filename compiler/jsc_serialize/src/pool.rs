//! Wire records of the type pool.
//!
//! These mirror the serialized message shapes one-to-one, including their
//! "unset" states: a reader must be able to represent anything a writer could
//! have produced, well-formed or not. Validation happens in the
//! [`ColorDeserializer`](crate::ColorDeserializer), not here.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{InvalidSerializedFormat, NativeType};

/// A reference to a type: either a native type or an entry in the pool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypePointer {
    /// No kind was set. Never valid to dereference.
    #[default]
    Unset,
    /// Raw [`NativeType`] value.
    Native(i32),
    /// Index into [`TypePool::types`].
    PoolOffset(u32),
}

impl TypePointer {
    #[inline]
    pub const fn native(native: NativeType) -> Self {
        Self::Native(native.raw())
    }

    #[inline]
    pub const fn pool_offset(offset: u32) -> Self {
        Self::PoolOffset(offset)
    }

    #[inline]
    pub const fn as_pool_offset(self) -> Option<u32> {
        match self {
            Self::PoolOffset(offset) => Some(offset),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(self, Self::Native(_))
    }
}

impl fmt::Display for TypePointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Unset => f.write_str("<unset>"),
            Self::Native(raw) => match NativeType::from_raw(raw) {
                Some(native) => write!(f, "{native}"),
                None => write!(f, "native#{raw}"),
            },
            Self::PoolOffset(offset) => write!(f, "offset#{offset}"),
        }
    }
}

/// One entry of the pool.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// No kind was set.
    #[default]
    Unset,
    Object(ObjectType),
    Union(UnionType),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    /// Unique within one pool.
    pub uuid: String,
    pub is_invalidating: bool,
    pub prototype: Option<TypePointer>,
    pub instance_type: Option<TypePointer>,
    pub debug_info: Option<TypeDebugInfo>,
}

impl ObjectType {
    pub fn with_uuid(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Self::default()
        }
    }
}

/// Members of a union. Well-formed pools hold at least two.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnionType {
    pub union_members: Vec<TypePointer>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDebugInfo {
    pub filename: Option<String>,
    pub class_name: Option<String>,
}

impl TypeDebugInfo {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.class_name.is_none()
    }
}

/// `subtype` is directly below `supertype` for property disambiguation.
///
/// Both sides must be [`TypePointer::PoolOffset`]s.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubtypingEdge {
    pub subtype: TypePointer,
    pub supertype: TypePointer,
}

/// A complete pool from one compilation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypePool {
    pub types: Vec<Type>,
    pub disambiguation_edges: Vec<SubtypingEdge>,
}

impl TypePool {
    /// Encode the pool for storage or transfer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode a pool previously written by [`to_bytes`](Self::to_bytes).
    ///
    /// Only the encoding is checked here; the entries themselves are
    /// validated as they are deserialized into Colors.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidSerializedFormat> {
        bincode::deserialize(bytes).map_err(|e| InvalidSerializedFormat::Decode(e.to_string()))
    }
}
