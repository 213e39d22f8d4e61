//! Declarative description of generated code
//!
//! The implementation generator produces these values; the printer in the
//! infrastructure layer turns them into text. Nothing here knows about
//! indentation or punctuation.

use std::path::PathBuf;

use serde::Serialize;

/// One generated output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Destination path (`<dir>/gen/<basename>`)
    pub path: PathBuf,
    /// Import declarations, in emission order
    pub imports: Vec<ImportDeclaration>,
    /// Generated classes, in component declaration order
    pub classes: Vec<ClassDescription>,
}

/// `import { name } from "from";`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportDeclaration {
    pub name: String,
    pub from: String,
}

impl ImportDeclaration {
    /// Create an import declaration
    pub fn new(name: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            from: from.into(),
        }
    }
}

/// An exported class extending one base class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassDescription {
    pub name: String,
    pub extends: String,
    pub members: Vec<ClassMember>,
}

impl ClassDescription {
    /// Methods of the class, in member order
    pub fn methods(&self) -> impl Iterator<Item = &MethodDescription> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Method(method) => Some(method),
            _ => None,
        })
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&MethodDescription> {
        self.methods().find(|method| method.name == name)
    }

    /// Fields of the class, in member order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescription> {
        self.members.iter().filter_map(|member| match member {
            ClassMember::Field(field) => Some(field),
            _ => None,
        })
    }

    /// The constructor, when one was generated
    pub fn constructor(&self) -> Option<&ConstructorDescription> {
        self.members.iter().find_map(|member| match member {
            ClassMember::Constructor(constructor) => Some(constructor),
            _ => None,
        })
    }
}

/// Member of a generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassMember {
    Method(MethodDescription),
    Field(FieldDescription),
    Constructor(ConstructorDescription),
}

/// Member visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Private,
}

/// Zero-argument method whose body is a single `return`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDescription {
    pub name: String,
    pub visibility: Visibility,
    pub is_async: bool,
    pub body: Expression,
}

/// Uninitialized field declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescription {
    pub name: String,
    pub visibility: Visibility,
}

/// Zero-argument constructor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstructorDescription {
    pub body: Vec<Statement>,
}

/// Constructor statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    /// `super();`
    SuperCall,
    /// `target = value;`
    Assign { target: Expression, value: Expression },
}

/// Expression tree used in generated bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    This,
    Identifier { name: String },
    /// `object.name`
    Property {
        object: Box<Expression>,
        name: String,
    },
    /// `callee(arguments...)`
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// `new class(arguments...)`
    New {
        class: String,
        arguments: Vec<Expression>,
    },
    /// `[elements...]`
    Array { elements: Vec<Expression> },
    /// `await inner`
    Await { inner: Box<Expression> },
}

impl Expression {
    /// `name`
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    /// `this.name`
    pub fn this_property(name: impl Into<String>) -> Self {
        Self::This.property(name)
    }

    /// `self.name`
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        Self::Property {
            object: Box::new(self),
            name: name.into(),
        }
    }

    /// `self(arguments...)`
    #[must_use]
    pub fn call(self, arguments: Vec<Expression>) -> Self {
        Self::Call {
            callee: Box::new(self),
            arguments,
        }
    }

    /// `await self` when `condition` holds, otherwise `self`
    #[must_use]
    pub fn awaited_if(self, condition: bool) -> Self {
        if condition {
            Self::Await {
                inner: Box::new(self),
            }
        } else {
            self
        }
    }
}
