//! Rich types to pool entries.
//!
//! The walk normalizes as it goes: aliases, enum elements, generic
//! instantiations and overloads all collapse onto the type they stand for, so
//! only objects and unions ever reach the pool.

use rustc_hash::FxHashMap;

use jsc_jstype::{
    FunctionData, FunctionKind, InvalidatingTypes, JsType, JsTypeId, JsTypeNative,
    JsTypeRegistry,
};

use crate::pool_creator::{IdentityKey, Reservation, TypePoolCreator};
use crate::stack::ensure_sufficient_stack;
use crate::{NativeType, ObjectType, Type, TypeDebugInfo, TypePointer, TypePool, UnionType};

/// Whether object entries carry [`TypeDebugInfo`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SerializationOptions {
    #[default]
    IncludeDebugInfo,
    SkipDebugInfo,
}

/// Hands out object uuids, starting from 0.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Serializes types from one registry into one pool.
///
/// Every distinct object-like node and every distinct union is written once,
/// no matter how many times it is reached. Uuids are sequential, so they are
/// only unique within the pool this serializer builds.
pub struct JsTypeSerializer<'r> {
    registry: &'r JsTypeRegistry,
    pool: TypePoolCreator<IdentityKey<'r, JsType>>,
    native_pointers: FxHashMap<JsTypeNative, TypePointer>,
    unknown_pointer: TypePointer,
    invalidating_types: &'r dyn InvalidatingTypes,
    id_generator: IdGenerator,
    options: SerializationOptions,
}

impl<'r> JsTypeSerializer<'r> {
    pub fn new(
        registry: &'r JsTypeRegistry,
        invalidating_types: &'r dyn InvalidatingTypes,
        options: SerializationOptions,
    ) -> Self {
        let native_pointers = JsTypeNative::ALL
            .into_iter()
            .filter_map(|native| {
                translate_native_type(native).map(|ty| (native, TypePointer::native(ty)))
            })
            .collect();

        Self {
            registry,
            pool: TypePoolCreator::new(),
            native_pointers,
            unknown_pointer: TypePointer::native(NativeType::UnknownType),
            invalidating_types,
            id_generator: IdGenerator::new(),
            options,
        }
    }

    /// Return a pointer to `id`, writing it (and everything it reaches) to
    /// the pool first if needed.
    ///
    /// # Panics
    /// Panics on a type the pool cannot represent: a native with no wire
    /// counterpart or an instance of an ordinary function.
    pub fn serialize_type(&mut self, id: JsTypeId) -> TypePointer {
        ensure_sufficient_stack(|| self.serialize_type_inner(id))
    }

    /// Finish and return the pool written so far.
    pub fn into_type_pool(self) -> TypePool {
        self.pool.into_type_pool()
    }

    fn serialize_type_inner(&mut self, id: JsTypeId) -> TypePointer {
        let registry = self.registry;
        let ty = registry.get(id);
        match ty {
            JsType::Native(native) => match self.native_pointers.get(native) {
                Some(&pointer) => pointer,
                None => unreachable!("native type {native:?} has no wire representation"),
            },
            JsType::Named { referenced, .. } => self.serialize_type(*referenced),
            JsType::EnumElement { primitive, .. } => self.serialize_type(*primitive),
            // Bounded generics are not modeled; every unresolved name is the
            // same unknown.
            JsType::Template { .. } | JsType::NoResolved { .. } => self.unknown_pointer,
            JsType::Templatized { base, .. } => self.serialize_type(*base),
            JsType::Union(alternates) => self.serialize_union_type(ty, alternates),
            JsType::Function(FunctionData {
                canonical: Some(canonical),
                ..
            }) => self.serialize_type(*canonical),
            JsType::Object(_) | JsType::Function(_) | JsType::Enum(_) => {
                self.serialize_object_type(id, ty)
            }
        }
    }

    fn serialize_union_type(&mut self, ty: &'r JsType, alternates: &[JsTypeId]) -> TypePointer {
        let mut members: Vec<TypePointer> = Vec::with_capacity(alternates.len());
        for &alternate in alternates {
            let pointer = self.serialize_type(alternate);
            if !members.contains(&pointer) {
                members.push(pointer);
            }
        }

        match members.as_slice() {
            [] => unreachable!("union without alternates"),
            [only] => *only,
            _ => match self.pool.reserve(IdentityKey::new(ty)) {
                Reservation::Existing(pointer) => pointer,
                Reservation::Fresh(pointer) => {
                    self.pool.fill(
                        pointer,
                        Type::Union(UnionType {
                            union_members: members,
                        }),
                    );
                    pointer
                }
            },
        }
    }

    fn serialize_object_type(&mut self, id: JsTypeId, ty: &'r JsType) -> TypePointer {
        let pointer = match self.pool.reserve(IdentityKey::new(ty)) {
            Reservation::Existing(pointer) => return pointer,
            Reservation::Fresh(pointer) => pointer,
        };

        let mut object = ObjectType::with_uuid(format!("{:x}", self.id_generator.new_id()));
        object.is_invalidating = self.invalidating_types.is_invalidating(id);

        // Optimizations must know that instances of a constructor can exist
        // at runtime even if none appears in the program.
        if let Some(function) = ty.as_function().filter(|f| f.has_instance_type()) {
            if let Some(instance) = function.instance_type {
                object.prototype = function.prototype.map(|proto| self.serialize_type(proto));
                object.instance_type = Some(self.serialize_type(instance));
            }
        }

        if self.options == SerializationOptions::IncludeDebugInfo {
            let info = debug_info(self.registry, ty);
            if !info.is_empty() {
                object.debug_info = Some(info);
            }
        }

        self.pool.fill(pointer, Type::Object(object));
        self.add_supertype_edges(ty, pointer);
        pointer
    }

    fn add_supertype_edges(&mut self, ty: &JsType, subtype: TypePointer) {
        for ancestor in self.own_ancestor_interfaces(ty) {
            let supertype = self.serialize_type(ancestor);
            self.add_edge(subtype, supertype);
        }
        if let Some(prototype) = ty.implicit_prototype() {
            let supertype = self.serialize_type(prototype);
            self.add_edge(subtype, supertype);
        }
    }

    /// Every type is implicitly below the natives, so edges to them carry
    /// nothing.
    fn add_edge(&mut self, subtype: TypePointer, supertype: TypePointer) {
        if !supertype.is_native() {
            self.pool.add_disambiguation_edge(subtype, supertype);
        }
    }

    /// Interfaces `ty` directly implements or extends.
    ///
    /// Only direct supertypes are returned, and only those that really are
    /// interfaces.
    fn own_ancestor_interfaces(&self, ty: &JsType) -> Vec<JsTypeId> {
        let registry = self.registry;
        let Some(ctor) = ty.constructor() else {
            return Vec::new();
        };
        let Some(function) = registry.get(ctor).as_function() else {
            unreachable!("constructor {ctor:?} is not a function");
        };

        let interfaces = match function.kind {
            FunctionKind::Interface => &function.extended_interfaces,
            FunctionKind::Constructor => &function.implemented_interfaces,
            FunctionKind::Ordinary => {
                unreachable!("instance of {ctor:?} has an ordinary function as its constructor")
            }
        };

        interfaces
            .iter()
            .copied()
            .filter(|&iface| {
                registry
                    .get(iface)
                    .constructor()
                    .and_then(|c| registry.get(c).as_function())
                    .is_some_and(|f| f.is_interface())
            })
            .collect()
    }
}

fn debug_info(registry: &JsTypeRegistry, ty: &JsType) -> TypeDebugInfo {
    let own_source = |id: JsTypeId| {
        registry
            .get(id)
            .as_function()
            .and_then(|f| f.source_file.clone())
    };

    let mut info = TypeDebugInfo {
        filename: ty.owner_function().and_then(own_source),
        class_name: ty.reference_name().map(str::to_owned),
    };

    match ty {
        JsType::Object(_) => {
            if let Some(ctor) = ty.constructor() {
                if let Some(name) = registry
                    .get(ctor)
                    .reference_name()
                    .filter(|name| !name.is_empty())
                {
                    info.class_name = Some(format!("{name} instance"));
                }
                if info.filename.is_none() {
                    info.filename = own_source(ctor);
                }
            }
        }
        JsType::Enum(data) => {
            if data.source_file.is_some() {
                info.filename.clone_from(&data.source_file);
            }
        }
        JsType::Function(function) => {
            if function.source_file.is_some() {
                info.filename.clone_from(&function.source_file);
            }
        }
        _ => {}
    }
    info
}

/// The wire counterpart of a checker native, if it has one.
///
/// Several checker natives share one wire native. Built-in object types such
/// as `Array` have none and are written as ordinary objects.
pub(crate) fn translate_native_type(native: JsTypeNative) -> Option<NativeType> {
    let translated = match native {
        JsTypeNative::String => NativeType::StringType,
        JsTypeNative::Boolean => NativeType::BooleanType,
        JsTypeNative::Number => NativeType::NumberType,
        JsTypeNative::Symbol => NativeType::SymbolType,
        JsTypeNative::Bigint => NativeType::BigintType,
        JsTypeNative::Null | JsTypeNative::Void => NativeType::NullOrVoidType,
        JsTypeNative::Object
        | JsTypeNative::ObjectFunction
        | JsTypeNative::ObjectPrototype
        | JsTypeNative::FunctionPrototype
        | JsTypeNative::Function
        | JsTypeNative::FunctionFunction => NativeType::TopObject,
        JsTypeNative::All
        | JsTypeNative::Unknown
        | JsTypeNative::CheckedUnknown
        | JsTypeNative::NoType
        | JsTypeNative::NoObject
        | JsTypeNative::NoResolved => NativeType::UnknownType,
        JsTypeNative::Array | JsTypeNative::RegExp | JsTypeNative::GlobalThis => return None,
    };
    Some(translated)
}
