//! The rich JavaScript type graph.
//!
//! This is the checker-side view of types that the serializer in
//! `jsc_serialize` walks. Types live in a [`JsTypeRegistry`] arena and are
//! referenced by [`JsTypeId`], so the graph may be cyclic: a constructor
//! points at its prototype and instance type, and the instance type points
//! back at the constructor.
//!
//! # Identity
//!
//! [`JsType`] compares structurally. Two distinct nodes with the same
//! contents (say, two anonymous object literals) are still different types,
//! so anything that needs to tell them apart must key on the node itself,
//! never on `JsType` equality.

mod invalidating;
mod native;
mod registry;
mod types;

pub use invalidating::InvalidatingTypes;
pub use native::JsTypeNative;
pub use registry::JsTypeRegistry;
pub use types::{
    EnumData, FunctionData, FunctionKind, JsType, JsTypeId, ObjectData, ObjectKind,
};
