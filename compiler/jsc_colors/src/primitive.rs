//! Primitive colors.

/// A closed set of primitive colors.
///
/// Each value is a singleton: there is exactly one `NUMBER`, one `STRING`,
/// and so on, and they compare by variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveColor {
    Number,
    String,
    Boolean,
    Symbol,
    Bigint,
    /// `null` and `undefined` are not distinguished.
    NullOrVoid,
    /// Anything at all, including objects the optimizer knows nothing about.
    Unknown,
}

impl PrimitiveColor {
    pub const ALL: [Self; 7] = [
        Self::Number,
        Self::String,
        Self::Boolean,
        Self::Symbol,
        Self::Bigint,
        Self::NullOrVoid,
        Self::Unknown,
    ];

    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Symbol => "symbol",
            Self::Bigint => "bigint",
            Self::NullOrVoid => "null_or_void",
            Self::Unknown => "unknown",
        }
    }

    /// Only `Unknown` blocks property disambiguation.
    #[inline]
    pub const fn is_invalidating(self) -> bool {
        matches!(self, Self::Unknown)
    }
}
