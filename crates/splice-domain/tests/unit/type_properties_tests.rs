//! Property-based tests for the equivalence predicate
//!
//! Shapes are generated as small trees and interned into a fresh table, so
//! the properties cover tuples, arrays, objects, unions and sets mixed with
//! the nominal descriptors.

use proptest::prelude::*;
use splice_domain::value_objects::{Field, Literal, Primitive, TypeId, TypeTable};

#[derive(Debug, Clone)]
enum Shape {
    Primitive(u8),
    Class(u8),
    Enum(u8),
    Literal(u8),
    Dynamic,
    Array(Box<Shape>),
    Tuple(Vec<Shape>),
    Object(Vec<(u8, Shape)>),
    Union(Vec<Shape>),
    Set(Box<Shape>),
}

const PRIMITIVES: [Primitive; 4] = [
    Primitive::Boolean,
    Primitive::Number,
    Primitive::String,
    Primitive::Object,
];

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        (0u8..4).prop_map(Shape::Primitive),
        (0u8..3).prop_map(Shape::Class),
        (0u8..2).prop_map(Shape::Enum),
        (0u8..3).prop_map(Shape::Literal),
        Just(Shape::Dynamic),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(|s| Shape::Array(Box::new(s))),
            prop::collection::vec(inner.clone(), 0..3).prop_map(Shape::Tuple),
            prop::collection::vec((0u8..3, inner.clone()), 0..3).prop_map(Shape::Object),
            prop::collection::vec(inner.clone(), 1..3).prop_map(Shape::Union),
            inner.prop_map(|s| Shape::Set(Box::new(s))),
        ]
    })
}

fn build(types: &mut TypeTable, shape: &Shape) -> TypeId {
    match shape {
        Shape::Primitive(index) => types.primitive(PRIMITIVES[usize::from(*index)]),
        Shape::Class(index) => types.class(format!("C{index}")),
        Shape::Enum(index) => types.enumeration(format!("E{index}")),
        Shape::Literal(index) => types.literal(Literal::String(format!("l{index}"))),
        Shape::Dynamic => types.dynamic(),
        Shape::Array(element) => {
            let element = build(types, element);
            types.array_of(element)
        }
        Shape::Tuple(items) => {
            let items = items.iter().map(|item| build(types, item)).collect();
            types.tuple(items)
        }
        Shape::Object(fields) => {
            let fields = fields
                .iter()
                .map(|(name, ty)| Field::new(format!("f{name}"), build(types, ty)))
                .collect();
            types.object(fields)
        }
        Shape::Union(members) => {
            let members = members.iter().map(|member| build(types, member)).collect();
            types.union(members)
        }
        Shape::Set(element) => {
            let element = build(types, element);
            types.set_of(element)
        }
    }
}

fn table_with_classes() -> TypeTable {
    let mut types = TypeTable::new();
    let number = types.primitive(Primitive::Number);
    // C0 and C1 share a shape; C2 differs
    types.define_class_fields("C0", vec![Field::new("f0", number)]);
    types.define_class_fields("C1", vec![Field::new("f0", number)]);
    types.define_class_fields("C2", vec![]);
    types
}

proptest! {
    #[test]
    fn test_equivalence_is_reflexive(a in shape()) {
        let mut types = table_with_classes();
        let a = build(&mut types, &a);
        prop_assert!(types.equivalent(a, a));
    }
}

proptest! {
    #[test]
    fn test_equivalence_is_symmetric(a in shape(), b in shape()) {
        let mut types = table_with_classes();
        let a = build(&mut types, &a);
        let b = build(&mut types, &b);
        prop_assert_eq!(types.equivalent(a, b), types.equivalent(b, a));
    }
}

proptest! {
    #[test]
    fn test_interning_is_deterministic(a in shape()) {
        let mut types = table_with_classes();
        let first = build(&mut types, &a);
        let second = build(&mut types, &a);
        prop_assert_eq!(first, second);
    }
}

proptest! {
    #[test]
    fn test_set_wrapping_preserves_equivalence(a in shape(), b in shape()) {
        let mut types = table_with_classes();
        let a = build(&mut types, &a);
        let b = build(&mut types, &b);
        let set_a = types.set_of(a);
        let set_b = types.set_of(b);
        prop_assert_eq!(types.equivalent(a, b), types.equivalent(set_a, set_b));
    }
}

proptest! {
    #[test]
    fn test_equivalent_types_are_mutually_assignable(a in shape(), b in shape()) {
        let mut types = table_with_classes();
        let a = build(&mut types, &a);
        let b = build(&mut types, &b);
        if types.equivalent(a, b) {
            prop_assert!(types.is_assignable(a, b));
            prop_assert!(types.is_assignable(b, a));
        }
    }
}

proptest! {
    #[test]
    fn test_distinct_classes_never_match(left in 0u8..3, right in 0u8..3) {
        let mut types = table_with_classes();
        let a = types.class(format!("C{left}"));
        let b = types.class(format!("C{right}"));
        prop_assert_eq!(types.equivalent(a, b), left == right);
    }
}
