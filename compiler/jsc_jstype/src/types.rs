//! Rich type nodes.

use std::fmt;

use crate::JsTypeNative;

/// Handle to a type in a [`JsTypeRegistry`](crate::JsTypeRegistry).
///
/// Ids below [`JsTypeNative::COUNT`] are the natives, in declaration order.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct JsTypeId(u32);

impl JsTypeId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_native(self) -> bool {
        self.0 < JsTypeNative::COUNT
    }
}

impl fmt::Debug for JsTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            write!(f, "JsTypeId({:?})", JsTypeNative::ALL[self.index()])
        } else {
            write!(f, "JsTypeId({})", self.0)
        }
    }
}

/// A node in the rich type graph.
///
/// Equality is structural; see the crate docs on identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JsType {
    Native(JsTypeNative),
    /// A reference by name to another type, e.g. a typedef.
    Named { name: String, referenced: JsTypeId },
    /// A member of an enum; behaves as the enum's underlying primitive.
    EnumElement {
        enum_type: JsTypeId,
        primitive: JsTypeId,
    },
    /// A type parameter such as `T`.
    Template { name: String },
    /// A generic instantiation such as `Array<string>`.
    Templatized {
        base: JsTypeId,
        parameters: Vec<JsTypeId>,
    },
    /// A name the checker could not resolve.
    NoResolved { name: String },
    Union(Vec<JsTypeId>),
    Object(ObjectData),
    Function(FunctionData),
    Enum(EnumData),
}

impl JsType {
    /// Objects, functions and enums: everything with properties of its own.
    pub fn is_object_like(&self) -> bool {
        matches!(self, JsType::Object(_) | JsType::Function(_) | JsType::Enum(_))
    }

    pub fn reference_name(&self) -> Option<&str> {
        match self {
            JsType::Object(object) => object.reference_name.as_deref(),
            JsType::Function(function) => function.reference_name.as_deref(),
            JsType::Enum(enum_data) => enum_data.reference_name.as_deref(),
            JsType::Named { name, .. }
            | JsType::Template { name }
            | JsType::NoResolved { name } => Some(name),
            _ => None,
        }
    }

    /// The object this type delegates property lookups to at runtime.
    pub fn implicit_prototype(&self) -> Option<JsTypeId> {
        match self {
            JsType::Object(object) => object.implicit_prototype,
            JsType::Function(function) => function.implicit_prototype,
            JsType::Enum(enum_data) => enum_data.implicit_prototype,
            _ => None,
        }
    }

    /// The constructor of an instance type.
    pub fn constructor(&self) -> Option<JsTypeId> {
        match self {
            JsType::Object(ObjectData {
                kind: ObjectKind::Instance { constructor },
                ..
            }) => Some(*constructor),
            _ => None,
        }
    }

    /// The function that owns this object, e.g. `Foo` for `Foo.prototype`.
    pub fn owner_function(&self) -> Option<JsTypeId> {
        match self {
            JsType::Object(object) => object.owner_function,
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionData> {
        match self {
            JsType::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// A plain object, a prototype object or an instance type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectData {
    pub reference_name: Option<String>,
    pub kind: ObjectKind,
    pub owner_function: Option<JsTypeId>,
    pub implicit_prototype: Option<JsTypeId>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Plain,
    /// Values created by `new constructor()`.
    Instance { constructor: JsTypeId },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FunctionKind {
    Ordinary,
    Constructor,
    Interface,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionData {
    pub reference_name: Option<String>,
    pub kind: FunctionKind,
    pub source_file: Option<String>,
    /// `Foo.prototype`, for constructors and interfaces.
    pub prototype: Option<JsTypeId>,
    pub instance_type: Option<JsTypeId>,
    /// Instance types of interfaces this constructor declares it implements.
    /// Does not include interfaces inherited from a superclass.
    pub implemented_interfaces: Vec<JsTypeId>,
    /// Instance types of interfaces this interface directly extends.
    pub extended_interfaces: Vec<JsTypeId>,
    /// The representative of an overload family, when this function is not it.
    pub canonical: Option<JsTypeId>,
    pub implicit_prototype: Option<JsTypeId>,
}

impl FunctionData {
    /// Constructors and interfaces produce instances.
    #[inline]
    pub fn has_instance_type(&self) -> bool {
        matches!(self.kind, FunctionKind::Constructor | FunctionKind::Interface)
    }

    #[inline]
    pub fn is_interface(&self) -> bool {
        self.kind == FunctionKind::Interface
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumData {
    pub reference_name: Option<String>,
    pub source_file: Option<String>,
    pub element_type: JsTypeId,
    pub implicit_prototype: Option<JsTypeId>,
}
