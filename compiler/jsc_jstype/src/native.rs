//! Built-in types known to the checker.

use crate::JsTypeId;

/// Types the registry creates up front, at fixed ids.
///
/// The order of [`ALL`](Self::ALL) is the order of their ids: the native at
/// position `n` is always `JsTypeId::from_raw(n)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum JsTypeNative {
    String = 0,
    Boolean = 1,
    Number = 2,
    Symbol = 3,
    Bigint = 4,
    Null = 5,
    Void = 6,
    Object = 7,
    ObjectFunction = 8,
    ObjectPrototype = 9,
    FunctionPrototype = 10,
    Function = 11,
    FunctionFunction = 12,
    All = 13,
    Unknown = 14,
    CheckedUnknown = 15,
    NoType = 16,
    NoObject = 17,
    NoResolved = 18,
    // Built-in object types with no dedicated wire representation.
    Array = 19,
    RegExp = 20,
    GlobalThis = 21,
}

impl JsTypeNative {
    pub const ALL: [Self; 22] = [
        Self::String,
        Self::Boolean,
        Self::Number,
        Self::Symbol,
        Self::Bigint,
        Self::Null,
        Self::Void,
        Self::Object,
        Self::ObjectFunction,
        Self::ObjectPrototype,
        Self::FunctionPrototype,
        Self::Function,
        Self::FunctionFunction,
        Self::All,
        Self::Unknown,
        Self::CheckedUnknown,
        Self::NoType,
        Self::NoObject,
        Self::NoResolved,
        Self::Array,
        Self::RegExp,
        Self::GlobalThis,
    ];

    /// Number of natives, and therefore the first id handed out to user types.
    #[allow(clippy::cast_possible_truncation)]
    pub const COUNT: u32 = Self::ALL.len() as u32;

    /// The fixed registry id of this native.
    #[inline]
    pub const fn type_id(self) -> JsTypeId {
        JsTypeId::from_raw(self as u32)
    }

    /// Natives that the registry represents as ordinary named objects rather
    /// than as [`JsType::Native`](crate::JsType::Native) nodes.
    pub const fn builtin_object_name(self) -> Option<&'static str> {
        match self {
            Self::Array => Some("Array"),
            Self::RegExp => Some("RegExp"),
            Self::GlobalThis => Some("global this"),
            _ => None,
        }
    }
}
