//! Resolution Aggregator
//!
//! Drives the engine once per resolver of a component, enforces that each
//! requested type has exactly one plan, and gathers what the generated
//! implementation needs: the module instances that contributed a plan and
//! every distinct sub-plan.

use std::collections::HashSet;

use splice_domain::{ComponentId, Error, Graph, ResolvedResolver, Resolution, Result};
use tracing::debug;

use super::type_resolution::TypeResolver;

/// Builds the [`Resolution`] of components of one graph
pub struct ResolutionAggregator<'g> {
    graph: &'g Graph,
}

impl<'g> ResolutionAggregator<'g> {
    /// Create an aggregator over `graph`
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Resolve every resolver of `component`
    ///
    /// Fails with the first resolver (in declaration order) that has no
    /// plan, more than one plan, or an asynchronous plan behind a
    /// synchronous return type.
    pub fn aggregate(&self, component: ComponentId) -> Result<Resolution> {
        let graph = self.graph;
        let types = graph.types();
        let declaration = graph.component(component);
        let mut engine = TypeResolver::new(graph);

        let mut resolvers = Vec::with_capacity(declaration.resolvers.len());
        let mut modules = Vec::new();
        let mut seen_modules = HashSet::new();
        let mut plans = Vec::new();
        let mut seen_plans = HashSet::new();

        for resolver in &declaration.resolvers {
            let type_name = || types.display(resolver.returns).to_string();
            let mut candidates = engine.resolve(declaration.module, resolver.returns);
            let resolution = match candidates.len() {
                0 => {
                    return Err(Error::unresolved_type(
                        &declaration.name,
                        &resolver.name,
                        type_name(),
                    ));
                }
                1 => candidates.swap_remove(0),
                count => {
                    return Err(Error::ambiguous_type(
                        &declaration.name,
                        &resolver.name,
                        type_name(),
                        count,
                    ));
                }
            };
            if resolution.requires_async() && !types.is_async_wrapper(resolver.returns) {
                return Err(Error::async_mismatch(
                    &declaration.name,
                    &resolver.name,
                    type_name(),
                ));
            }

            resolution.walk(&mut |plan| {
                if seen_modules.insert(plan.module()) {
                    modules.push(plan.module());
                }
                if seen_plans.insert(plan.key()) {
                    plans.push(plan.clone());
                }
            });
            debug!(
                component = %declaration.name,
                resolver = %resolver.name,
                "resolved {}",
                type_name()
            );
            resolvers.push(ResolvedResolver {
                name: resolver.name.clone(),
                resolution,
            });
        }

        Ok(Resolution {
            component,
            resolvers,
            modules,
            plans,
        })
    }
}
