use std::sync::Arc;

use pretty_assertions::assert_eq;

use super::*;
use crate::{SubtypingEdge, TypeDebugInfo};

fn object(uuid: &str) -> Type {
    Type::Object(ObjectType::with_uuid(uuid))
}

fn union(members: impl IntoIterator<Item = TypePointer>) -> Type {
    Type::Union(UnionType {
        union_members: members.into_iter().collect(),
    })
}

fn native(native: NativeType) -> TypePointer {
    TypePointer::native(native)
}

fn offset(offset: u32) -> TypePointer {
    TypePointer::pool_offset(offset)
}

fn edge(subtype: u32, supertype: u32) -> SubtypingEdge {
    SubtypingEdge {
        subtype: offset(subtype),
        supertype: offset(supertype),
    }
}

fn pool(types: Vec<Type>) -> TypePool {
    TypePool {
        types,
        disambiguation_edges: Vec::new(),
    }
}

fn deserializer(pool: &TypePool) -> ColorDeserializer<'_> {
    ColorDeserializer::build_from_type_pool(pool)
        .unwrap_or_else(|e| panic!("pool should be accepted: {e}"))
}

fn resolve(deserializer: &ColorDeserializer<'_>, pointer: TypePointer) -> Color {
    deserializer
        .pointer_to_color(pointer)
        .unwrap_or_else(|e| panic!("{pointer} should resolve: {e}"))
}

// ── Natives ─────────────────────────────────────────────────

#[test]
fn natives_map_to_primitives() {
    let empty = TypePool::default();
    let de = deserializer(&empty);

    let expected = [
        (NativeType::NumberType, Color::NUMBER),
        (NativeType::StringType, Color::STRING),
        (NativeType::BooleanType, Color::BOOLEAN),
        (NativeType::SymbolType, Color::SYMBOL),
        (NativeType::BigintType, Color::BIGINT),
        (NativeType::NullOrVoidType, Color::NULL_OR_VOID),
        (NativeType::UnknownType, Color::UNKNOWN),
    ];
    for (native_type, color) in expected {
        assert_eq!(resolve(&de, native(native_type)), color);
    }
}

#[test]
fn top_object_is_one_shared_invalidating_object() {
    let empty = TypePool::default();
    let de = deserializer(&empty);

    let first = resolve(&de, native(NativeType::TopObject));
    let second = resolve(&de, native(NativeType::TopObject));

    let top = first.as_object();
    assert_eq!(top.id(), TOP_OBJECT_ID);
    assert!(top.is_invalidating());
    assert!(top.disambiguation_supertypes().is_empty());
    match (&first, &second) {
        (Color::Object(a), Color::Object(b)) => assert!(Arc::ptr_eq(a, b)),
        _ => panic!("top object should be an object color"),
    }
}

#[test]
fn unknown_native_value_is_rejected() {
    let empty = TypePool::default();
    let de = deserializer(&empty);

    assert_eq!(
        de.pointer_to_color(TypePointer::Native(42)),
        Err(InvalidSerializedFormat::UnrecognizedNativeType { raw: 42 })
    );
}

// ── Objects ─────────────────────────────────────────────────

#[test]
fn single_object_entry() {
    let pool = pool(vec![object("Foo")]);
    let de = deserializer(&pool);

    assert_eq!(resolve(&de, offset(0)), ObjectColor::builder("Foo").build());
}

#[test]
fn constructor_with_prototype_and_instance() {
    let pool = pool(vec![
        object("Foo.prototype"),
        object("Foo instance"),
        Type::Object(ObjectType {
            prototype: Some(offset(0)),
            instance_type: Some(offset(1)),
            ..ObjectType::with_uuid("Foo")
        }),
    ]);
    let de = deserializer(&pool);

    assert_eq!(
        resolve(&de, offset(2)),
        ObjectColor::builder("Foo")
            .with_prototype(ObjectColor::builder("Foo.prototype").build())
            .with_instance_color(ObjectColor::builder("Foo instance").build())
            .build()
    );
}

#[test]
fn object_fields_are_copied() {
    let pool = pool(vec![Type::Object(ObjectType {
        is_invalidating: true,
        debug_info: Some(TypeDebugInfo {
            filename: Some("foo.js".to_owned()),
            class_name: Some("Foo".to_owned()),
        }),
        ..ObjectType::with_uuid("a")
    })]);
    let de = deserializer(&pool);

    let color = resolve(&de, offset(0));
    let object = color.as_object();
    assert_eq!(object.id(), "a");
    assert!(object.is_invalidating());
    assert_eq!(
        object.debug_info(),
        &DebugInfo {
            filename: Some("foo.js".to_owned()),
            class_name: Some("Foo".to_owned()),
        }
    );
}

#[test]
fn supertypes_keep_edge_order() {
    let pool = TypePool {
        types: vec![object("A"), object("B"), object("C")],
        disambiguation_edges: vec![edge(1, 0), edge(1, 2)],
    };
    let de = deserializer(&pool);

    let color = resolve(&de, offset(1));
    assert_eq!(
        color.as_object().disambiguation_supertypes(),
        &[
            ObjectColor::builder("A").build(),
            ObjectColor::builder("C").build(),
        ]
    );
    assert!(resolve(&de, offset(0)).as_object().disambiguation_supertypes().is_empty());
}

#[test]
fn duplicate_edges_are_kept() {
    let pool = TypePool {
        types: vec![object("A"), object("B")],
        disambiguation_edges: vec![edge(1, 0), edge(1, 0)],
    };
    let de = deserializer(&pool);

    let color = resolve(&de, offset(1));
    assert_eq!(color.as_object().disambiguation_supertypes().len(), 2);
}

#[test]
fn repeated_lookups_share_the_cached_color() {
    let pool = pool(vec![
        object("A"),
        union([native(NativeType::NumberType), offset(0)]),
    ]);
    let de = deserializer(&pool);

    for pointer in [offset(0), offset(1)] {
        let first = resolve(&de, pointer);
        let second = resolve(&de, pointer);
        match (&first, &second) {
            (Color::Object(a), Color::Object(b)) => assert!(Arc::ptr_eq(a, b)),
            (Color::Union(a), Color::Union(b)) => assert!(Arc::ptr_eq(a, b)),
            _ => panic!("unexpected colors {first} and {second}"),
        }
    }
}

// ── Unions ──────────────────────────────────────────────────

#[test]
fn union_of_equal_members_collapses() {
    let pool = pool(vec![union([
        native(NativeType::NumberType),
        native(NativeType::NumberType),
    ])]);
    let de = deserializer(&pool);

    assert_eq!(resolve(&de, offset(0)), Color::NUMBER);
}

#[test]
fn nested_unions_stay_alternates() {
    let pool = pool(vec![
        union([native(NativeType::NumberType), native(NativeType::StringType)]),
        union([
            offset(0),
            native(NativeType::NumberType),
            native(NativeType::StringType),
        ]),
    ]);
    let de = deserializer(&pool);

    let inner = resolve(&de, offset(0));
    let outer = resolve(&de, offset(1));

    assert_eq!(
        outer,
        Color::union([inner.clone(), Color::NUMBER, Color::STRING])
    );
    assert_eq!(outer.alternates().len(), 3);
    assert!(outer.alternates().contains(&inner));
}

#[test]
fn single_member_union_is_rejected_at_any_offset() {
    let first = pool(vec![union([native(NativeType::NumberType)]), object("A")]);
    let second = pool(vec![object("A"), union([native(NativeType::NumberType)])]);

    assert_eq!(
        deserializer(&first).pointer_to_color(offset(0)),
        Err(InvalidSerializedFormat::UnionTooSmall {
            offset: 0,
            members: 1
        })
    );
    assert_eq!(
        deserializer(&second).pointer_to_color(offset(1)),
        Err(InvalidSerializedFormat::UnionTooSmall {
            offset: 1,
            members: 1
        })
    );
}

#[test]
fn forward_and_backward_references_resolve() {
    let backward = pool(vec![
        object("A"),
        union([native(NativeType::NumberType), offset(0)]),
    ]);
    let forward = pool(vec![
        union([native(NativeType::NumberType), offset(1)]),
        object("A"),
    ]);
    let expected = Color::union([Color::NUMBER, ObjectColor::builder("A").build()]);

    assert_eq!(resolve(&deserializer(&backward), offset(1)), expected);
    assert_eq!(resolve(&deserializer(&forward), offset(0)), expected);
}

// ── Malformed pools ─────────────────────────────────────────

#[test]
fn cycles_are_rejected() {
    let pool = pool(vec![
        union([native(NativeType::NumberType), offset(1)]),
        union([native(NativeType::NumberType), offset(0)]),
    ]);
    let de = deserializer(&pool);

    assert_eq!(
        de.pointer_to_color(offset(0)),
        Err(InvalidSerializedFormat::Cycle { offset: 0 })
    );
    assert_eq!(
        de.pointer_to_color(offset(1)),
        Err(InvalidSerializedFormat::Cycle { offset: 1 })
    );
}

#[test]
fn failed_resolution_leaves_no_stale_progress() {
    let pool = pool(vec![
        union([offset(1), native(NativeType::StringType)]),
        union([native(NativeType::NumberType)]),
    ]);
    let de = deserializer(&pool);

    let error = InvalidSerializedFormat::UnionTooSmall {
        offset: 1,
        members: 1,
    };
    // Retrying reports the same problem rather than a cycle.
    assert_eq!(de.pointer_to_color(offset(0)), Err(error.clone()));
    assert_eq!(de.pointer_to_color(offset(0)), Err(error));
}

#[test]
fn self_referencing_prototype_is_a_cycle() {
    let pool = pool(vec![Type::Object(ObjectType {
        prototype: Some(offset(0)),
        ..ObjectType::with_uuid("Loop")
    })]);
    let de = deserializer(&pool);

    assert_eq!(
        de.pointer_to_color(offset(0)),
        Err(InvalidSerializedFormat::Cycle { offset: 0 })
    );
}

#[test]
fn native_edges_fail_at_construction() {
    let pool = TypePool {
        types: vec![object("A")],
        disambiguation_edges: vec![SubtypingEdge {
            subtype: native(NativeType::NumberType),
            supertype: offset(0),
        }],
    };

    assert_eq!(
        ColorDeserializer::build_from_type_pool(&pool).err(),
        Some(InvalidSerializedFormat::NonOffsetEdge {
            subtype: native(NativeType::NumberType),
            supertype: offset(0),
        })
    );
}

#[test]
fn out_of_bounds_offsets_are_rejected() {
    let pool = TypePool {
        types: vec![object("A")],
        disambiguation_edges: vec![edge(0, 5)],
    };
    // Edge targets are only checked when followed.
    let de = deserializer(&pool);

    assert_eq!(
        de.pointer_to_color(offset(3)),
        Err(InvalidSerializedFormat::OffsetOutOfBounds {
            pointer: offset(3),
            pool_size: 1,
        })
    );
    assert_eq!(
        de.pointer_to_color(offset(0)),
        Err(InvalidSerializedFormat::OffsetOutOfBounds {
            pointer: offset(5),
            pool_size: 1,
        })
    );
}

#[test]
fn unset_pointers_and_types_are_rejected() {
    let pool = pool(vec![Type::Unset]);
    let de = deserializer(&pool);

    assert_eq!(
        de.pointer_to_color(TypePointer::Unset),
        Err(InvalidSerializedFormat::UnsetPointer)
    );
    assert_eq!(
        de.pointer_to_color(offset(0)),
        Err(InvalidSerializedFormat::UnsetType { offset: 0 })
    );
}

#[test]
fn error_messages_name_the_format() {
    let error = InvalidSerializedFormat::Cycle { offset: 3 };
    assert_eq!(
        error.to_string(),
        "Invalid serialized Type format: cannot deserialize type in cycle at offset 3"
    );
}

// ── Bulk resolution ─────────────────────────────────────────

#[test]
fn colors_resolves_every_entry_in_order() {
    let pool = pool(vec![
        object("A"),
        union([native(NativeType::StringType), offset(0)]),
    ]);
    let de = deserializer(&pool);

    let colors = de
        .colors()
        .unwrap_or_else(|e| panic!("pool should resolve: {e}"));

    let a = ObjectColor::builder("A").build();
    assert_eq!(colors, vec![a.clone(), Color::union([Color::STRING, a])]);
    assert!(std::ptr::eq(de.type_pool(), &pool));
}

#[test]
fn colors_reports_the_first_error() {
    let pool = pool(vec![object("A"), Type::Unset]);
    let de = deserializer(&pool);

    assert_eq!(
        de.colors(),
        Err(InvalidSerializedFormat::UnsetType { offset: 1 })
    );
}
