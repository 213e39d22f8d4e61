//! Domain entities
//!
//! | Entity | Description |
//! |--------|-------------|
//! | [`Graph`] | Modules, providers and components of one generation run |
//! | [`Resolution`] | Per-component plans produced by the resolver |

pub mod graph;
pub mod resolution;

pub use graph::{Component, Graph, GraphBuilder, Module, Provider, Resolver};
pub use resolution::{
    PlanKey, ProviderResolution, Resolution, ResolvedResolver, SetResolution, TypeResolution,
};
