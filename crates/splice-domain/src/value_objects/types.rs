//! Type descriptors and the equivalence predicate
//!
//! Requested and produced types are interned in a [`TypeTable`]; a [`TypeId`]
//! is the identity of a descriptor. Two descriptors are *equivalent* (`~`)
//! when they are identical, or when neither is dynamic, an enum or a nominal
//! class and each is assignable to the other. Classes only ever match
//! themselves so that unrelated classes of the same shape are never
//! substituted for one another.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::constants::{ASYNC_WRAPPER_NAME, SET_CONTAINER_NAME};

/// Identity of an interned type descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(usize);

impl TypeId {
    /// Position of the descriptor in its table
    pub fn index(self) -> usize {
        self.0
    }
}

/// Built-in scalar types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Number,
    String,
    BigInt,
    Symbol,
    /// Any non-primitive value
    Object,
    Void,
    Undefined,
    Null,
}

impl Primitive {
    /// Parse a primitive keyword
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "boolean" => Some(Self::Boolean),
            "number" => Some(Self::Number),
            "string" => Some(Self::String),
            "bigint" => Some(Self::BigInt),
            "symbol" => Some(Self::Symbol),
            "object" => Some(Self::Object),
            "void" => Some(Self::Void),
            "undefined" => Some(Self::Undefined),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// Keyword spelling of the primitive
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::Void => "void",
            Self::Undefined => "undefined",
            Self::Null => "null",
        }
    }

    fn is_nullish(self) -> bool {
        matches!(self, Self::Void | Self::Undefined | Self::Null)
    }
}

/// Literal value types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    String(String),
    /// Kept in source spelling so interning stays exact
    Number(String),
}

impl Literal {
    /// Primitive the literal widens to
    pub fn widened(&self) -> Primitive {
        match self {
            Self::String(_) => Primitive::String,
            Self::Number(_) => Primitive::Number,
        }
    }
}

/// Named member of a structural shape
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
}

impl Field {
    /// Create a field
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Shape of a requested or produced value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    /// Unconstrained (`any` / `unknown`); never matched structurally
    Dynamic,
    Primitive(Primitive),
    Literal(Literal),
    /// Enumerated type; never matched structurally
    Enum(String),
    /// Nominal class; equivalent only to itself
    Class(String),
    /// Named generic instantiation such as `Set<T>` or `Map<K, V>`
    Reference {
        name: String,
        arguments: Vec<TypeId>,
    },
    Array(TypeId),
    Tuple(Vec<TypeId>),
    /// Structural object shape, fields sorted by name
    Object(Vec<Field>),
    /// Union, members sorted and deduplicated
    Union(Vec<TypeId>),
}

/// Interning arena of type descriptors
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    descriptors: Vec<TypeDescriptor>,
    interned: HashMap<TypeDescriptor, TypeId>,
    class_fields: HashMap<String, Vec<Field>>,
}

impl TypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether no descriptor has been interned
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptor behind an identifier
    pub fn get(&self, id: TypeId) -> &TypeDescriptor {
        &self.descriptors[id.index()]
    }

    /// Intern a descriptor, normalizing object and union members first
    pub fn intern(&mut self, descriptor: TypeDescriptor) -> TypeId {
        let descriptor = match descriptor {
            TypeDescriptor::Object(mut fields) => {
                fields.sort_by(|a, b| a.name.cmp(&b.name));
                fields.dedup_by(|later, earlier| later.name == earlier.name);
                TypeDescriptor::Object(fields)
            }
            TypeDescriptor::Union(members) => {
                let mut flat = Vec::with_capacity(members.len());
                for member in members {
                    match self.get(member) {
                        TypeDescriptor::Union(nested) => flat.extend(nested.iter().copied()),
                        _ => flat.push(member),
                    }
                }
                flat.sort();
                flat.dedup();
                if let [single] = flat.as_slice() {
                    return *single;
                }
                TypeDescriptor::Union(flat)
            }
            other => other,
        };
        if let Some(id) = self.interned.get(&descriptor) {
            return *id;
        }
        let id = TypeId(self.descriptors.len());
        self.descriptors.push(descriptor.clone());
        self.interned.insert(descriptor, id);
        id
    }

    /// Intern the dynamic type
    pub fn dynamic(&mut self) -> TypeId {
        self.intern(TypeDescriptor::Dynamic)
    }

    /// Intern a primitive type
    pub fn primitive(&mut self, primitive: Primitive) -> TypeId {
        self.intern(TypeDescriptor::Primitive(primitive))
    }

    /// Intern a nominal class type
    pub fn class(&mut self, name: impl Into<String>) -> TypeId {
        self.intern(TypeDescriptor::Class(name.into()))
    }

    /// Intern an enum type
    pub fn enumeration(&mut self, name: impl Into<String>) -> TypeId {
        self.intern(TypeDescriptor::Enum(name.into()))
    }

    /// Intern a named generic instantiation
    pub fn reference(&mut self, name: impl Into<String>, arguments: Vec<TypeId>) -> TypeId {
        self.intern(TypeDescriptor::Reference {
            name: name.into(),
            arguments,
        })
    }

    /// Intern `Set<element>`
    pub fn set_of(&mut self, element: TypeId) -> TypeId {
        self.reference(SET_CONTAINER_NAME, vec![element])
    }

    /// Intern `Promise<inner>`
    pub fn promise_of(&mut self, inner: TypeId) -> TypeId {
        self.reference(ASYNC_WRAPPER_NAME, vec![inner])
    }

    /// Intern `element[]`
    pub fn array_of(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeDescriptor::Array(element))
    }

    /// Intern a tuple
    pub fn tuple(&mut self, elements: Vec<TypeId>) -> TypeId {
        self.intern(TypeDescriptor::Tuple(elements))
    }

    /// Intern a structural object shape
    pub fn object(&mut self, fields: Vec<Field>) -> TypeId {
        self.intern(TypeDescriptor::Object(fields))
    }

    /// Intern a union
    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.intern(TypeDescriptor::Union(members))
    }

    /// Intern a literal type
    pub fn literal(&mut self, literal: Literal) -> TypeId {
        self.intern(TypeDescriptor::Literal(literal))
    }

    /// Record the field shape of a class, used when a class is compared to a shape
    pub fn define_class_fields(&mut self, name: impl Into<String>, mut fields: Vec<Field>) {
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        self.class_fields.insert(name.into(), fields);
    }

    /// Field shape of a class (empty when never defined)
    pub fn class_fields(&self, name: &str) -> &[Field] {
        self.class_fields.get(name).map_or(&[], Vec::as_slice)
    }

    /// Element type when `id` is a set container with exactly one argument
    pub fn set_element(&self, id: TypeId) -> Option<TypeId> {
        self.single_argument(id, SET_CONTAINER_NAME)
    }

    /// Inner type when `id` is the asynchronous-result wrapper
    pub fn async_inner(&self, id: TypeId) -> Option<TypeId> {
        self.single_argument(id, ASYNC_WRAPPER_NAME)
    }

    /// Whether `id` is the asynchronous-result wrapper
    pub fn is_async_wrapper(&self, id: TypeId) -> bool {
        self.async_inner(id).is_some()
    }

    /// Unwrap one level of the asynchronous-result wrapper
    pub fn awaited(&self, id: TypeId) -> TypeId {
        self.async_inner(id).unwrap_or(id)
    }

    fn single_argument(&self, id: TypeId, container: &str) -> Option<TypeId> {
        match self.get(id) {
            TypeDescriptor::Reference { name, arguments } if name == container => {
                match arguments.as_slice() {
                    [argument] => Some(*argument),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// The equivalence relation `~` used to match providers against requests
    pub fn equivalent(&self, a: TypeId, b: TypeId) -> bool {
        if a == b {
            return true;
        }
        let (left, right) = (self.get(a), self.get(b));
        if let (
            TypeDescriptor::Reference {
                name: left_name,
                arguments: left_arguments,
            },
            TypeDescriptor::Reference {
                name: right_name,
                arguments: right_arguments,
            },
        ) = (left, right)
        {
            if left_name == right_name {
                return left_arguments.len() == right_arguments.len()
                    && left_arguments
                        .iter()
                        .zip(right_arguments)
                        .all(|(l, r)| self.equivalent(*l, *r));
            }
        }
        if [left, right].into_iter().any(|d| {
            matches!(
                d,
                TypeDescriptor::Dynamic | TypeDescriptor::Enum(_) | TypeDescriptor::Class(_)
            )
        }) {
            return false;
        }
        let mut assumed = HashSet::new();
        self.assignable(a, b, &mut assumed) && self.assignable(b, a, &mut assumed)
    }

    /// Whether values of `source` are accepted where `target` is expected
    pub fn is_assignable(&self, source: TypeId, target: TypeId) -> bool {
        self.assignable(source, target, &mut HashSet::new())
    }

    fn assignable(
        &self,
        source: TypeId,
        target: TypeId,
        assumed: &mut HashSet<(TypeId, TypeId)>,
    ) -> bool {
        if source == target {
            return true;
        }
        let (from, to) = (self.get(source), self.get(target));
        if matches!(from, TypeDescriptor::Dynamic) || matches!(to, TypeDescriptor::Dynamic) {
            return true;
        }
        if let TypeDescriptor::Union(members) = from {
            return members.iter().all(|m| self.assignable(*m, target, assumed));
        }
        if let TypeDescriptor::Union(members) = to {
            return members.iter().any(|m| self.assignable(source, *m, assumed));
        }
        match to {
            TypeDescriptor::Primitive(Primitive::Object) => !matches!(
                from,
                TypeDescriptor::Primitive(_) | TypeDescriptor::Literal(_) | TypeDescriptor::Enum(_)
            ),
            TypeDescriptor::Primitive(primitive) => {
                matches!(from, TypeDescriptor::Literal(literal) if literal.widened() == *primitive)
            }
            TypeDescriptor::Array(element) => match from {
                TypeDescriptor::Array(from_element) => {
                    self.assignable(*from_element, *element, assumed)
                }
                TypeDescriptor::Tuple(items) => items
                    .iter()
                    .all(|item| self.assignable(*item, *element, assumed)),
                _ => false,
            },
            TypeDescriptor::Tuple(items) => match from {
                TypeDescriptor::Tuple(from_items) => {
                    from_items.len() == items.len()
                        && from_items
                            .iter()
                            .zip(items)
                            .all(|(f, t)| self.assignable(*f, *t, assumed))
                }
                _ => false,
            },
            TypeDescriptor::Reference { name, arguments } => match from {
                TypeDescriptor::Reference {
                    name: from_name,
                    arguments: from_arguments,
                } => {
                    from_name == name
                        && from_arguments.len() == arguments.len()
                        && from_arguments
                            .iter()
                            .zip(arguments)
                            .all(|(f, t)| self.assignable(*f, *t, assumed))
                }
                _ => false,
            },
            TypeDescriptor::Class(name) => {
                self.shape_assignable(source, target, self.class_fields(name), assumed)
            }
            TypeDescriptor::Object(fields) => {
                self.shape_assignable(source, target, fields, assumed)
            }
            // identical literals and enums were caught by the identity check
            TypeDescriptor::Literal(_)
            | TypeDescriptor::Enum(_)
            | TypeDescriptor::Dynamic
            | TypeDescriptor::Union(_) => false,
        }
    }

    fn shape_assignable(
        &self,
        source: TypeId,
        target: TypeId,
        target_fields: &[Field],
        assumed: &mut HashSet<(TypeId, TypeId)>,
    ) -> bool {
        let source_fields = match self.get(source) {
            TypeDescriptor::Class(name) => self.class_fields(name),
            TypeDescriptor::Object(fields) => fields.as_slice(),
            TypeDescriptor::Primitive(primitive) if primitive.is_nullish() => return false,
            _ => return target_fields.is_empty(),
        };
        if !assumed.insert((source, target)) {
            return true;
        }
        let accepted = target_fields.iter().all(|wanted| {
            source_fields
                .iter()
                .find(|field| field.name == wanted.name)
                .is_some_and(|field| self.assignable(field.ty, wanted.ty, assumed))
        });
        assumed.remove(&(source, target));
        accepted
    }

    /// Render a type the way it would be written in a type expression
    pub fn display(&self, id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay { table: self, id }
    }
}

/// [`fmt::Display`] adapter returned by [`TypeTable::display`]
pub struct TypeDisplay<'a> {
    table: &'a TypeTable,
    id: TypeId,
}

impl TypeDisplay<'_> {
    fn nested(&self, id: TypeId) -> Self {
        TypeDisplay {
            table: self.table,
            id,
        }
    }

    fn write_list(&self, f: &mut fmt::Formatter<'_>, ids: &[TypeId], separator: &str) -> fmt::Result {
        for (index, id) in ids.iter().enumerate() {
            if index > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{}", self.nested(*id))?;
        }
        Ok(())
    }
}

impl fmt::Display for TypeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.table.get(self.id) {
            TypeDescriptor::Dynamic => f.write_str("any"),
            TypeDescriptor::Primitive(primitive) => f.write_str(primitive.keyword()),
            TypeDescriptor::Literal(Literal::String(value)) => write!(f, "{value:?}"),
            TypeDescriptor::Literal(Literal::Number(value)) => f.write_str(value),
            TypeDescriptor::Enum(name) | TypeDescriptor::Class(name) => f.write_str(name),
            TypeDescriptor::Reference { name, arguments } => {
                f.write_str(name)?;
                if !arguments.is_empty() {
                    f.write_str("<")?;
                    self.write_list(f, arguments, ", ")?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeDescriptor::Array(element) => {
                if matches!(self.table.get(*element), TypeDescriptor::Union(_)) {
                    write!(f, "({})[]", self.nested(*element))
                } else {
                    write!(f, "{}[]", self.nested(*element))
                }
            }
            TypeDescriptor::Tuple(items) => {
                f.write_str("[")?;
                self.write_list(f, items, ", ")?;
                f.write_str("]")
            }
            TypeDescriptor::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (index, field) in fields.iter().enumerate() {
                    if index > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}: {}", field.name, self.nested(field.ty))?;
                }
                f.write_str(" }")
            }
            TypeDescriptor::Union(members) => self.write_list(f, members, " | "),
        }
    }
}
