//! The renaming-safety oracle.

use rustc_hash::FxHashSet;

use crate::JsTypeId;

/// Decides whether a type is unsafe for property disambiguation.
///
/// The policy lives outside the serializer; the serializer only records the
/// answer on each object it writes.
pub trait InvalidatingTypes {
    fn is_invalidating(&self, ty: JsTypeId) -> bool;
}

/// A precomputed set of invalidating types.
impl InvalidatingTypes for FxHashSet<JsTypeId> {
    fn is_invalidating(&self, ty: JsTypeId) -> bool {
        self.contains(&ty)
    }
}
