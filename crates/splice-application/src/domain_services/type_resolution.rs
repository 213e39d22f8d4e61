//! Type Resolution Engine
//!
//! Resolves a requested type inside a stack of module contexts into candidate
//! plans. Four rules are tried in a fixed order and their candidates are
//! concatenated:
//!
//! 1. **Provider** - providers of the current module whose return type matches,
//!    each parameter satisfied by the *first* candidate found for it
//! 2. **Set** - for `Set<T>`, one set plan aggregating *every* candidate for `T`
//! 3. **Included module** - everything found in each included module
//! 4. **Parent fallback** - everything found in the enclosing context, only
//!    when the current module requires the type
//!
//! Candidates are pushed into a sink that may stop the enumeration early,
//! which is how "first candidate" lookups avoid exploring the rest of the
//! search space. A `(module, type)` guard held for the duration of one
//! enumeration breaks cycles between modules; it is not a cache.

use std::collections::HashSet;
use std::ops::ControlFlow;

use splice_domain::{
    Graph, ModuleId, ProviderId, ProviderResolution, SetId, SetResolution, TypeId,
    TypeResolution,
};
use tracing::debug;

type Sink<'s> = dyn FnMut(TypeResolution) -> ControlFlow<()> + 's;

/// Per-component resolution engine
///
/// Set identities are allocated from a counter owned by the resolver, so
/// every set plan produced by one instance has a distinct [`SetId`].
pub struct TypeResolver<'g> {
    graph: &'g Graph,
    stack: Vec<ModuleId>,
    guard: HashSet<(ModuleId, TypeId)>,
    next_set: usize,
}

impl<'g> TypeResolver<'g> {
    /// Create a resolver over `graph`
    pub fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            stack: Vec::new(),
            guard: HashSet::new(),
            next_set: 0,
        }
    }

    /// Every candidate plan for `ty` starting from `root`, in rule order
    pub fn resolve(&mut self, root: ModuleId, ty: TypeId) -> Vec<TypeResolution> {
        self.stack.clear();
        self.stack.push(root);
        let candidates = self.collect(ty);
        self.stack.clear();
        candidates
    }

    fn collect(&mut self, ty: TypeId) -> Vec<TypeResolution> {
        let mut candidates = Vec::new();
        let _ = self.enumerate(ty, &mut |plan| {
            candidates.push(plan);
            ControlFlow::Continue(())
        });
        candidates
    }

    fn first(&mut self, ty: TypeId) -> Option<TypeResolution> {
        let mut found = None;
        let _ = self.enumerate(ty, &mut |plan| {
            found = Some(plan);
            ControlFlow::Break(())
        });
        found
    }

    fn enumerate(&mut self, ty: TypeId, sink: &mut Sink<'_>) -> ControlFlow<()> {
        let Some(&module) = self.stack.last() else {
            return ControlFlow::Continue(());
        };
        if !self.guard.insert((module, ty)) {
            return ControlFlow::Continue(());
        }
        let flow = self.apply_rules(module, ty, sink);
        self.guard.remove(&(module, ty));
        flow
    }

    fn apply_rules(&mut self, module: ModuleId, ty: TypeId, sink: &mut Sink<'_>) -> ControlFlow<()> {
        self.provider_rule(module, ty, sink)?;
        self.set_rule(module, ty, sink)?;
        self.included_module_rule(module, ty, sink)?;
        self.parent_fallback_rule(module, ty, sink)
    }

    fn provider_rule(&mut self, module: ModuleId, ty: TypeId, sink: &mut Sink<'_>) -> ControlFlow<()> {
        let graph = self.graph;
        for (id, provider) in graph.providers_of(module) {
            if !provides(graph, provider.returns, ty) {
                continue;
            }
            let Some(arguments) = self.resolve_arguments(module, id) else {
                continue;
            };
            let requires_async =
                provider.deferred || arguments.iter().any(TypeResolution::requires_async);
            sink(TypeResolution::Provider(ProviderResolution {
                ty,
                module,
                provider: id,
                arguments,
                requires_async,
            }))?;
        }
        ControlFlow::Continue(())
    }

    fn resolve_arguments(
        &mut self,
        module: ModuleId,
        provider: ProviderId,
    ) -> Option<Vec<TypeResolution>> {
        let graph = self.graph;
        let declaration = graph.provider(provider);
        let mut arguments = Vec::with_capacity(declaration.parameters.len());
        for &parameter in &declaration.parameters {
            match self.first(parameter) {
                Some(plan) => arguments.push(plan),
                None => {
                    debug!(
                        module = %graph.module(module).name,
                        provider = %declaration.name,
                        parameter = %graph.types().display(parameter),
                        "skipping provider candidate: parameter cannot be satisfied"
                    );
                    return None;
                }
            }
        }
        Some(arguments)
    }

    fn set_rule(&mut self, module: ModuleId, ty: TypeId, sink: &mut Sink<'_>) -> ControlFlow<()> {
        let Some(element) = self.graph.types().set_element(ty) else {
            return ControlFlow::Continue(());
        };
        let id = SetId(self.next_set);
        self.next_set += 1;
        let elements = self.collect(element);
        let requires_async = elements.iter().any(TypeResolution::requires_async);
        sink(TypeResolution::Set(SetResolution {
            id,
            ty,
            module,
            elements,
            requires_async,
        }))
    }

    fn included_module_rule(
        &mut self,
        module: ModuleId,
        ty: TypeId,
        sink: &mut Sink<'_>,
    ) -> ControlFlow<()> {
        let graph = self.graph;
        for &included in &graph.module(module).includes {
            self.stack.push(included);
            let flow = self.enumerate(ty, sink);
            self.stack.pop();
            flow?;
        }
        ControlFlow::Continue(())
    }

    fn parent_fallback_rule(
        &mut self,
        module: ModuleId,
        ty: TypeId,
        sink: &mut Sink<'_>,
    ) -> ControlFlow<()> {
        if !self.graph.module(module).requires_type(ty) {
            return ControlFlow::Continue(());
        }
        let Some(current) = self.stack.pop() else {
            return ControlFlow::Continue(());
        };
        let flow = self.enumerate(ty, sink);
        self.stack.push(current);
        flow
    }
}

/// Whether a provider returning `returns` can serve a request for `requested`
///
/// Either side may be the async wrapper of the other, so a `Promise<T>`
/// request is served by a `T` provider and a deferred `Promise<T>` provider
/// serves a `T` request.
fn provides(graph: &Graph, returns: TypeId, requested: TypeId) -> bool {
    let types = graph.types();
    types.equivalent(returns, requested)
        || types.equivalent(returns, types.awaited(requested))
        || types.equivalent(types.awaited(returns), requested)
}
