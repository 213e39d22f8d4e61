//! Resolution plans
//!
//! A [`TypeResolution`] is a tree describing how one requested type is
//! produced inside one module context. A [`Resolution`] gathers the winning
//! plan of every resolver of a component together with the module instances
//! and distinct sub-plans its generated implementation needs.

use serde::Serialize;

use crate::value_objects::{ComponentId, ModuleId, ProviderId, SetId, TypeId};

/// "Call `provider` on the `module` instance after resolving each argument"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderResolution {
    /// Type the plan was resolved for
    pub ty: TypeId,
    pub module: ModuleId,
    pub provider: ProviderId,
    /// One plan per provider parameter
    pub arguments: Vec<TypeResolution>,
    pub requires_async: bool,
}

/// "Build a set from every element plan"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetResolution {
    /// Synthetic identity; set plans are never merged
    pub id: SetId,
    /// The requested `Set<T>` type
    pub ty: TypeId,
    /// Module context the set was requested from
    pub module: ModuleId,
    pub elements: Vec<TypeResolution>,
    pub requires_async: bool,
}

/// One candidate plan produced by the resolution engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeResolution {
    Provider(ProviderResolution),
    Set(SetResolution),
}

/// Deduplication key of a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlanKey {
    Provider(ModuleId, ProviderId),
    Set(SetId),
}

impl TypeResolution {
    /// Type the plan satisfies
    pub fn ty(&self) -> TypeId {
        match self {
            Self::Provider(plan) => plan.ty,
            Self::Set(plan) => plan.ty,
        }
    }

    /// Module instance that owns the plan's accessor
    pub fn module(&self) -> ModuleId {
        match self {
            Self::Provider(plan) => plan.module,
            Self::Set(plan) => plan.module,
        }
    }

    /// Whether executing the plan needs `await`
    pub fn requires_async(&self) -> bool {
        match self {
            Self::Provider(plan) => plan.requires_async,
            Self::Set(plan) => plan.requires_async,
        }
    }

    /// Direct sub-plans (provider arguments or set elements)
    pub fn children(&self) -> &[TypeResolution] {
        match self {
            Self::Provider(plan) => &plan.arguments,
            Self::Set(plan) => &plan.elements,
        }
    }

    pub fn key(&self) -> PlanKey {
        match self {
            Self::Provider(plan) => PlanKey::Provider(plan.module, plan.provider),
            Self::Set(plan) => PlanKey::Set(plan.id),
        }
    }

    /// Visit this plan and every sub-plan, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TypeResolution)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}

/// A resolver together with its unique plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedResolver {
    pub name: String,
    pub resolution: TypeResolution,
}

/// Aggregated resolution of one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub component: ComponentId,
    /// Resolvers in declaration order
    pub resolvers: Vec<ResolvedResolver>,
    /// Module instances that contributed a plan, first-encountered order
    pub modules: Vec<ModuleId>,
    /// Distinct plans, first-encountered order
    pub plans: Vec<TypeResolution>,
}
