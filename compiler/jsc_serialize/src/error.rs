//! Errors from reading a type pool.

use crate::TypePointer;

/// The pool is not something this reader can turn into Colors.
///
/// Always fatal for the pool as a whole: there is no partial recovery.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidSerializedFormat {
    #[error(
        "Invalid serialized Type format: type pointer {pointer} has out-of-bounds pool offset for pool size {pool_size}"
    )]
    OffsetOutOfBounds {
        pointer: TypePointer,
        pool_size: usize,
    },

    #[error("Invalid serialized Type format: cannot dereference a type pointer without a kind")]
    UnsetPointer,

    #[error("Invalid serialized Type format: expected every type to have a kind, found none at offset {offset}")]
    UnsetType { offset: u32 },

    #[error(
        "Invalid serialized Type format: subtyping is only supported between pool offsets, found {subtype} <: {supertype}"
    )]
    NonOffsetEdge {
        subtype: TypePointer,
        supertype: TypePointer,
    },

    /// Colors cannot be cyclic; the entry was reached again while it was
    /// still being built.
    #[error("Invalid serialized Type format: cannot deserialize type in cycle at offset {offset}")]
    Cycle { offset: u32 },

    #[error(
        "Invalid serialized Type format: unions must have at least 2 members, found {members} at offset {offset}"
    )]
    UnionTooSmall { offset: u32, members: usize },

    #[error("Invalid serialized Type format: unrecognized native type {raw}")]
    UnrecognizedNativeType { raw: i32 },

    #[error("Invalid serialized Type format: {0}")]
    Decode(String),
}
