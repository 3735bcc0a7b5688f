//! Colors: the optimizer's view of JavaScript types.
//!
//! A [`Color`] is a small, immutable summary of a type from the full type
//! checker. Optimization passes (inlining, property disambiguation and
//! renaming) consume Colors instead of the checker's own types so that they
//! never depend on the type checker itself.
//!
//! # Variants
//!
//! - [`PrimitiveColor`]: one of a closed set of singleton primitives
//! - [`ObjectColor`]: a user-defined or native object type, with its
//!   prototype, instance type and direct disambiguation supertypes
//! - [`UnionColor`]: two or more distinct alternates
//!
//! Colors compare by value. Object and union payloads sit behind an [`Arc`]
//! so a Color graph can be shared freely once it has been built; nothing in
//! this crate mutates a Color after construction.

mod object;
mod primitive;
mod union;

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub use object::{DebugInfo, ObjectColor, ObjectColorBuilder};
pub use primitive::PrimitiveColor;
pub use union::UnionColor;

/// An immutable type summary.
///
/// Exactly one of [`is_primitive`](Self::is_primitive),
/// [`is_object`](Self::is_object) and [`is_union`](Self::is_union) holds for
/// any Color. Variant-specific accessors panic on the wrong variant: asking a
/// primitive for its alternates is a bug in the caller.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Color {
    Primitive(PrimitiveColor),
    Object(Arc<ObjectColor>),
    Union(Arc<UnionColor>),
}

impl Color {
    pub const NUMBER: Self = Self::Primitive(PrimitiveColor::Number);
    pub const STRING: Self = Self::Primitive(PrimitiveColor::String);
    pub const BOOLEAN: Self = Self::Primitive(PrimitiveColor::Boolean);
    pub const SYMBOL: Self = Self::Primitive(PrimitiveColor::Symbol);
    pub const BIGINT: Self = Self::Primitive(PrimitiveColor::Bigint);
    pub const NULL_OR_VOID: Self = Self::Primitive(PrimitiveColor::NullOrVoid);
    pub const UNKNOWN: Self = Self::Primitive(PrimitiveColor::Unknown);

    /// Build a union over `alternates`.
    ///
    /// Duplicates are removed by value, and a set that ends up with a single
    /// member yields that member rather than a union wrapper. Alternates that
    /// are themselves unions are kept as they are.
    ///
    /// # Panics
    /// Panics if `alternates` is empty.
    pub fn union(alternates: impl IntoIterator<Item = Color>) -> Color {
        let mut set: BTreeSet<Color> = alternates.into_iter().collect();

        if set.len() > 1 {
            return Color::Union(Arc::new(UnionColor::new(set)));
        }
        match set.pop_first() {
            Some(only) => only,
            None => panic!("cannot build a union color without alternates"),
        }
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        matches!(self, Color::Primitive(_))
    }

    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Color::Object(_))
    }

    #[inline]
    pub fn is_union(&self) -> bool {
        matches!(self, Color::Union(_))
    }

    /// Whether property disambiguation must back off for values of this color.
    ///
    /// A union is invalidating as soon as one of its alternates is.
    pub fn is_invalidating(&self) -> bool {
        match self {
            Color::Primitive(primitive) => primitive.is_invalidating(),
            Color::Object(object) => object.is_invalidating(),
            Color::Union(union) => union.alternates().iter().any(Color::is_invalidating),
        }
    }

    /// The primitive payload.
    ///
    /// # Panics
    /// Panics if this is not a primitive color.
    pub fn as_primitive(&self) -> PrimitiveColor {
        match self {
            Color::Primitive(primitive) => *primitive,
            other => panic!("expected a primitive color, found `{other}`"),
        }
    }

    /// The object payload.
    ///
    /// # Panics
    /// Panics if this is not an object color.
    pub fn as_object(&self) -> &ObjectColor {
        match self {
            Color::Object(object) => object,
            other => panic!("expected an object color, found `{other}`"),
        }
    }

    /// The alternates of a union.
    ///
    /// # Panics
    /// Panics if this is not a union color.
    pub fn alternates(&self) -> &BTreeSet<Color> {
        match self {
            Color::Union(union) => union.alternates(),
            other => panic!("expected a union color, found `{other}`"),
        }
    }
}

impl From<PrimitiveColor> for Color {
    fn from(primitive: PrimitiveColor) -> Self {
        Color::Primitive(primitive)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Primitive(primitive) => f.write_str(primitive.name()),
            Color::Object(object) => match &object.debug_info().class_name {
                Some(name) => write!(f, "{name}"),
                None => write!(f, "object#{}", object.id()),
            },
            Color::Union(union) => {
                f.write_str("(")?;
                for (i, alternate) in union.alternates().iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{alternate}")?;
                }
                f.write_str(")")
            }
        }
    }
}
