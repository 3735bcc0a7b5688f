//! Object colors and their builder.

use std::sync::Arc;

use crate::Color;

/// Names used only when printing or debugging Colors.
///
/// Never consulted by optimizations.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DebugInfo {
    pub filename: Option<String>,
    pub class_name: Option<String>,
}

impl DebugInfo {
    pub const EMPTY: Self = Self {
        filename: None,
        class_name: None,
    };

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.class_name.is_none()
    }
}

/// A user-defined or native object type.
///
/// Identified by `id`, which is unique within the pool the color came from.
/// Two object colors with the same fields are equal; the optimizer relies on
/// ids being distinct for distinct source types.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectColor {
    id: String,
    invalidating: bool,
    // Given `function Foo() {}` or `class Foo {}`: the color of `Foo.prototype`.
    prototype: Option<Color>,
    instance_color: Option<Color>,
    disambiguation_supertypes: Vec<Color>,
    debug_info: DebugInfo,
}

impl ObjectColor {
    /// Start building an object color with the given id.
    ///
    /// Defaults: not invalidating, no prototype or instance color, no
    /// supertypes, empty debug info.
    pub fn builder(id: impl Into<String>) -> ObjectColorBuilder {
        ObjectColorBuilder {
            object: ObjectColor {
                id: id.into(),
                invalidating: false,
                prototype: None,
                instance_color: None,
                disambiguation_supertypes: Vec::new(),
                debug_info: DebugInfo::EMPTY,
            },
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn is_invalidating(&self) -> bool {
        self.invalidating
    }

    #[inline]
    pub fn prototype(&self) -> Option<&Color> {
        self.prototype.as_ref()
    }

    #[inline]
    pub fn instance_color(&self) -> Option<&Color> {
        self.instance_color.as_ref()
    }

    /// Colors directly above this one in the subtyping graph, for the
    /// purposes of property disambiguation. Order follows the source edges.
    #[inline]
    pub fn disambiguation_supertypes(&self) -> &[Color] {
        &self.disambiguation_supertypes
    }

    #[inline]
    pub fn debug_info(&self) -> &DebugInfo {
        &self.debug_info
    }
}

/// Builder for [`ObjectColor`]. See [`ObjectColor::builder`].
#[derive(Clone, Debug)]
#[must_use]
pub struct ObjectColorBuilder {
    object: ObjectColor,
}

impl ObjectColorBuilder {
    pub fn with_invalidating(mut self, invalidating: bool) -> Self {
        self.object.invalidating = invalidating;
        self
    }

    pub fn with_prototype(mut self, prototype: Color) -> Self {
        self.object.prototype = Some(prototype);
        self
    }

    pub fn with_instance_color(mut self, instance_color: Color) -> Self {
        self.object.instance_color = Some(instance_color);
        self
    }

    pub fn with_disambiguation_supertypes(
        mut self,
        supertypes: impl IntoIterator<Item = Color>,
    ) -> Self {
        self.object.disambiguation_supertypes = supertypes.into_iter().collect();
        self
    }

    pub fn with_debug_info(mut self, debug_info: DebugInfo) -> Self {
        self.object.debug_info = debug_info;
        self
    }

    /// Shorthand for debug info carrying only a class name.
    pub fn with_debug_name(self, name: impl Into<String>) -> Self {
        self.with_debug_info(DebugInfo {
            filename: None,
            class_name: Some(name.into()),
        })
    }

    pub fn build(self) -> Color {
        Color::Object(Arc::new(self.object))
    }
}
