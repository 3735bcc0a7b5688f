//! The type pool: how Colors cross from the type checker to the optimizer.
//!
//! The type checker's graph is rich, mutable and often cyclic. Optimization
//! passes only need a small summary of it, and must not depend on the checker
//! at all. This crate is the codec between the two:
//!
//! ```text
//! JsTypeRegistry ──JsTypeSerializer──▶ TypePoolCreator ──▶ TypePool (bytes)
//!                                                              │
//!                       Color graph ◀──ColorDeserializer───────┘
//! ```
//!
//! - [`JsTypeSerializer`] walks rich types, unwraps aliases, enums and
//!   generics, dedups union members, and writes object and union entries through a
//!   [`TypePoolCreator`] that dedups by node identity.
//! - [`TypePool`] is the flat wire structure: entries addressed by offset plus
//!   the subtyping edges used by property disambiguation.
//! - [`ColorDeserializer`] lazily turns [`TypePointer`]s back into
//!   [`Color`](jsc_colors::Color)s, memoizing each offset and rejecting
//!   cycles and malformed entries with [`InvalidSerializedFormat`].
//!
//! Cycles in the rich graph are fine on the way in: entries refer to each
//! other by offset. Cycles in the resulting Colors are not supported and are
//! reported as format errors.

mod deserializer;
mod error;
mod native;
mod pool;
mod pool_creator;
mod serializer;
mod stack;

pub use deserializer::ColorDeserializer;
pub use error::InvalidSerializedFormat;
pub use native::NativeType;
pub use pool::{
    ObjectType, SubtypingEdge, Type, TypeDebugInfo, TypePointer, TypePool, UnionType,
};
pub use pool_creator::{IdentityKey, Reservation, TypePoolCreator};
pub use serializer::{IdGenerator, JsTypeSerializer, SerializationOptions};
