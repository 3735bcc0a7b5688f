//! Native types on the wire.

use std::fmt;

/// Built-in types that are never allocated in the pool.
///
/// Stored on the wire as their raw `i32` value inside
/// [`TypePointer::Native`](crate::TypePointer::Native), so a reader can meet
/// values it does not know.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum NativeType {
    NumberType = 0,
    StringType = 1,
    BooleanType = 2,
    SymbolType = 3,
    BigintType = 4,
    NullOrVoidType = 5,
    UnknownType = 6,
    /// The supertype of all objects but not of primitives.
    TopObject = 7,
}

impl NativeType {
    pub const ALL: [Self; 8] = [
        Self::NumberType,
        Self::StringType,
        Self::BooleanType,
        Self::SymbolType,
        Self::BigintType,
        Self::NullOrVoidType,
        Self::UnknownType,
        Self::TopObject,
    ];

    #[inline]
    pub const fn raw(self) -> i32 {
        self as i32
    }

    /// Decode a raw wire value, or `None` if it names no known native.
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::NumberType),
            1 => Some(Self::StringType),
            2 => Some(Self::BooleanType),
            3 => Some(Self::SymbolType),
            4 => Some(Self::BigintType),
            5 => Some(Self::NullOrVoidType),
            6 => Some(Self::UnknownType),
            7 => Some(Self::TopObject),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NumberType => "NUMBER_TYPE",
            Self::StringType => "STRING_TYPE",
            Self::BooleanType => "BOOLEAN_TYPE",
            Self::SymbolType => "SYMBOL_TYPE",
            Self::BigintType => "BIGINT_TYPE",
            Self::NullOrVoidType => "NULL_OR_VOID_TYPE",
            Self::UnknownType => "UNKNOWN_TYPE",
            Self::TopObject => "TOP_OBJECT",
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
