//! Arena of rich types.

use crate::{
    EnumData, FunctionData, FunctionKind, JsType, JsTypeId, JsTypeNative, ObjectData, ObjectKind,
};

/// Owns every [`JsType`] of a compilation and hands out [`JsTypeId`]s.
///
/// Natives are created first, at the fixed ids given by
/// [`JsTypeNative::type_id`]. Everything else is appended in creation order.
/// Nodes that refer to each other (a constructor and its instance type) are
/// created together and linked in place.
#[derive(Clone, Debug)]
pub struct JsTypeRegistry {
    types: Vec<JsType>,
}

impl JsTypeRegistry {
    pub fn new() -> Self {
        let mut types = Vec::with_capacity(JsTypeNative::COUNT as usize * 2);
        for native in JsTypeNative::ALL {
            let ty = match native.builtin_object_name() {
                Some(name) => JsType::Object(ObjectData {
                    reference_name: Some(name.to_owned()),
                    kind: ObjectKind::Plain,
                    owner_function: None,
                    implicit_prototype: Some(JsTypeNative::ObjectPrototype.type_id()),
                }),
                None => JsType::Native(native),
            };
            types.push(ty);
        }
        Self { types }
    }

    /// Look up a type.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this registry.
    #[inline]
    pub fn get(&self, id: JsTypeId) -> &JsType {
        &self.types[id.index()]
    }

    #[inline]
    pub fn native_type(&self, native: JsTypeNative) -> JsTypeId {
        native.type_id()
    }

    /// Number of nodes, natives included.
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds nothing beyond the natives.
    pub fn has_only_natives(&self) -> bool {
        self.types.len() == JsTypeNative::COUNT as usize
    }

    /// The id the next [`add`](Self::add) will return.
    ///
    /// # Panics
    /// Panics if the registry outgrows `u32` ids.
    pub fn next_id(&self) -> JsTypeId {
        let raw = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type registry exceeded {} entries", u32::MAX));
        JsTypeId::from_raw(raw)
    }

    /// Append a node as-is.
    ///
    /// # Panics
    /// Panics if the registry outgrows `u32` ids.
    pub fn add(&mut self, ty: JsType) -> JsTypeId {
        let id = self.next_id();
        self.types.push(ty);
        id
    }

    // === Objects ===

    /// A plain object whose prototype is `Object.prototype`.
    pub fn create_object_type(&mut self, name: Option<&str>) -> JsTypeId {
        self.create_object_type_with_prototype(
            name,
            Some(JsTypeNative::ObjectPrototype.type_id()),
        )
    }

    pub fn create_object_type_with_prototype(
        &mut self,
        name: Option<&str>,
        implicit_prototype: Option<JsTypeId>,
    ) -> JsTypeId {
        self.add(JsType::Object(ObjectData {
            reference_name: name.map(str::to_owned),
            kind: ObjectKind::Plain,
            owner_function: None,
            implicit_prototype,
        }))
    }

    // === Functions ===

    /// A `class` or `@constructor` function, together with its prototype
    /// object and instance type.
    pub fn create_constructor_type(&mut self, name: &str, source_file: Option<&str>) -> JsTypeId {
        self.create_instantiable(name, source_file, FunctionKind::Constructor)
    }

    /// An `@interface`, together with its prototype object and instance type.
    pub fn create_interface_type(&mut self, name: &str, source_file: Option<&str>) -> JsTypeId {
        self.create_instantiable(name, source_file, FunctionKind::Interface)
    }

    /// A function that cannot be instantiated.
    pub fn create_function_type(
        &mut self,
        name: Option<&str>,
        source_file: Option<&str>,
    ) -> JsTypeId {
        self.add(JsType::Function(Self::function_data(
            name,
            source_file,
            FunctionKind::Ordinary,
        )))
    }

    fn function_data(
        name: Option<&str>,
        source_file: Option<&str>,
        kind: FunctionKind,
    ) -> FunctionData {
        FunctionData {
            reference_name: name.map(str::to_owned),
            kind,
            source_file: source_file.map(str::to_owned),
            prototype: None,
            instance_type: None,
            implemented_interfaces: Vec::new(),
            extended_interfaces: Vec::new(),
            canonical: None,
            implicit_prototype: Some(JsTypeNative::FunctionPrototype.type_id()),
        }
    }

    fn create_instantiable(
        &mut self,
        name: &str,
        source_file: Option<&str>,
        kind: FunctionKind,
    ) -> JsTypeId {
        let ctor = self.add(JsType::Function(Self::function_data(
            Some(name),
            source_file,
            kind,
        )));
        let prototype = self.add(JsType::Object(ObjectData {
            reference_name: Some(format!("{name}.prototype")),
            kind: ObjectKind::Plain,
            owner_function: Some(ctor),
            implicit_prototype: Some(JsTypeNative::ObjectPrototype.type_id()),
        }));
        let instance = self.add(JsType::Object(ObjectData {
            reference_name: Some(name.to_owned()),
            kind: ObjectKind::Instance { constructor: ctor },
            owner_function: None,
            implicit_prototype: Some(prototype),
        }));

        let function = self.function_mut(ctor);
        function.prototype = Some(prototype);
        function.instance_type = Some(instance);
        ctor
    }

    /// Make `function` defer to `canonical`, as a non-representative member
    /// of an overload family does.
    pub fn set_canonical_representation(&mut self, function: JsTypeId, canonical: JsTypeId) {
        self.function_mut(function).canonical = Some(canonical);
    }

    /// Record that `ctor` directly implements the interface `iface`.
    pub fn add_implemented_interface(&mut self, ctor: JsTypeId, iface: JsTypeId) {
        let instance = self.instance_type_of(iface);
        self.function_mut(ctor).implemented_interfaces.push(instance);
    }

    /// Record that interface `iface` directly extends interface `parent`.
    pub fn add_extended_interface(&mut self, iface: JsTypeId, parent: JsTypeId) {
        let instance = self.instance_type_of(parent);
        self.function_mut(iface).extended_interfaces.push(instance);
    }

    /// `class ctor extends superclass`: instances of `superclass` become the
    /// implicit prototype of `ctor.prototype`.
    pub fn set_superclass(&mut self, ctor: JsTypeId, superclass: JsTypeId) {
        let super_instance = self.instance_type_of(superclass);
        let prototype = self.prototype_of(ctor);
        match &mut self.types[prototype.index()] {
            JsType::Object(object) => object.implicit_prototype = Some(super_instance),
            other => panic!("prototype of {ctor:?} is not an object: {other:?}"),
        }
    }

    /// # Panics
    /// Panics if `ctor` is not a constructor or interface.
    pub fn instance_type_of(&self, ctor: JsTypeId) -> JsTypeId {
        match self.get(ctor).as_function().and_then(|f| f.instance_type) {
            Some(instance) => instance,
            None => panic!("{ctor:?} has no instance type"),
        }
    }

    /// # Panics
    /// Panics if `ctor` is not a constructor or interface.
    pub fn prototype_of(&self, ctor: JsTypeId) -> JsTypeId {
        match self.get(ctor).as_function().and_then(|f| f.prototype) {
            Some(prototype) => prototype,
            None => panic!("{ctor:?} has no prototype"),
        }
    }

    fn function_mut(&mut self, id: JsTypeId) -> &mut FunctionData {
        match &mut self.types[id.index()] {
            JsType::Function(function) => function,
            other => panic!("{id:?} is not a function: {other:?}"),
        }
    }

    // === Enums ===

    /// An enum whose members have the given primitive type.
    ///
    /// The element type is available via [`EnumData::element_type`].
    pub fn create_enum_type(
        &mut self,
        name: &str,
        source_file: Option<&str>,
        primitive: JsTypeId,
    ) -> JsTypeId {
        let enum_type = self.add(JsType::Native(JsTypeNative::Unknown));
        let element_type = self.add(JsType::EnumElement {
            enum_type,
            primitive,
        });
        self.types[enum_type.index()] = JsType::Enum(EnumData {
            reference_name: Some(name.to_owned()),
            source_file: source_file.map(str::to_owned),
            element_type,
            implicit_prototype: Some(JsTypeNative::ObjectPrototype.type_id()),
        });
        enum_type
    }

    /// # Panics
    /// Panics if `enum_type` is not an enum.
    pub fn enum_element_type(&self, enum_type: JsTypeId) -> JsTypeId {
        match self.get(enum_type) {
            JsType::Enum(data) => data.element_type,
            other => panic!("{enum_type:?} is not an enum: {other:?}"),
        }
    }

    // === Type references ===

    pub fn create_union_type(&mut self, alternates: impl IntoIterator<Item = JsTypeId>) -> JsTypeId {
        self.add(JsType::Union(alternates.into_iter().collect()))
    }

    pub fn create_named_type(&mut self, name: &str, referenced: JsTypeId) -> JsTypeId {
        self.add(JsType::Named {
            name: name.to_owned(),
            referenced,
        })
    }

    pub fn create_template_type(&mut self, name: &str) -> JsTypeId {
        self.add(JsType::Template {
            name: name.to_owned(),
        })
    }

    pub fn create_templatized_type(
        &mut self,
        base: JsTypeId,
        parameters: impl IntoIterator<Item = JsTypeId>,
    ) -> JsTypeId {
        self.add(JsType::Templatized {
            base,
            parameters: parameters.into_iter().collect(),
        })
    }

    pub fn create_no_resolved_type(&mut self, name: &str) -> JsTypeId {
        self.add(JsType::NoResolved {
            name: name.to_owned(),
        })
    }
}

impl Default for JsTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
