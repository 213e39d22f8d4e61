//! Value objects
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ids`] | Arena identifiers for graph declarations and set plans |
//! | [`types`] | Interned type descriptors and the equivalence predicate |
//! | [`class_description`] | Declarative description of generated classes |

pub mod class_description;
pub mod ids;
pub mod types;

pub use class_description::{
    ClassDescription, ClassMember, ConstructorDescription, Expression, FieldDescription,
    GeneratedFile, ImportDeclaration, MethodDescription, Statement, Visibility,
};
pub use ids::{ComponentId, ModuleId, ProviderId, SetId};
pub use types::{Field, Literal, Primitive, TypeDescriptor, TypeDisplay, TypeId, TypeTable};
