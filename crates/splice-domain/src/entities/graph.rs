//! Declaration graph
//!
//! The read-only universe of modules, providers and components a generation
//! run works on. Declarations live in arenas owned by the [`Graph`] and refer
//! to each other by identifier, so cyclic `includes` edges need no shared
//! ownership. A graph is assembled once through a [`GraphBuilder`] and never
//! mutated afterwards.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::value_objects::{ComponentId, ModuleId, ProviderId, TypeId, TypeTable};

/// A factory owned by one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Method name on the module class
    pub name: String,
    /// Owning module
    pub module: ModuleId,
    /// Parameter types, in declaration order
    pub parameters: Vec<TypeId>,
    /// Produced type; wrapped in `Promise` when the provider is deferred
    pub returns: TypeId,
    /// Whether production is asynchronous
    pub deferred: bool,
}

/// A named group of providers with visibility edges and parent requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    pub name: String,
    /// Source file declaring the module class
    pub source: PathBuf,
    /// Providers in declaration order
    pub providers: Vec<ProviderId>,
    /// Included modules in declaration order; may form cycles
    pub includes: Vec<ModuleId>,
    /// Types this module expects from its enclosing context
    pub requires: BTreeSet<TypeId>,
}

impl Module {
    /// Whether the module opts into parent fallback for `ty`
    pub fn requires_type(&self, ty: TypeId) -> bool {
        self.requires.contains(&ty)
    }
}

/// A zero-argument abstract method requesting one type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolver {
    pub name: String,
    pub returns: TypeId,
}

/// A consumer interface anchored to a root module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    /// Source file declaring the component class
    pub source: PathBuf,
    /// Root module resolution starts from
    pub module: ModuleId,
    /// Resolvers in declaration order
    pub resolvers: Vec<Resolver>,
}

/// Immutable declaration graph
#[derive(Debug, Clone, Default)]
pub struct Graph {
    types: TypeTable,
    modules: Vec<Module>,
    providers: Vec<Provider>,
    components: Vec<Component>,
}

impl Graph {
    /// Start assembling a graph
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Type descriptors referenced by the graph
    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// Module behind an identifier
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    /// Provider behind an identifier
    pub fn provider(&self, id: ProviderId) -> &Provider {
        &self.providers[id.index()]
    }

    /// Component behind an identifier
    pub fn component(&self, id: ComponentId) -> &Component {
        &self.components[id.index()]
    }

    /// All modules in declaration order
    pub fn modules(&self) -> impl ExactSizeIterator<Item = (ModuleId, &Module)> {
        self.modules
            .iter()
            .enumerate()
            .map(|(index, module)| (ModuleId::new(index), module))
    }

    /// All components in declaration order
    pub fn components(&self) -> impl ExactSizeIterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(index, component)| (ComponentId::new(index), component))
    }

    /// Providers of a module in declaration order
    pub fn providers_of(&self, module: ModuleId) -> impl Iterator<Item = (ProviderId, &Provider)> {
        self.module(module)
            .providers
            .iter()
            .map(|id| (*id, self.provider(*id)))
    }

    /// Find a module by name
    pub fn find_module(&self, name: &str) -> Option<ModuleId> {
        self.modules
            .iter()
            .position(|module| module.name == name)
            .map(ModuleId::new)
    }

    /// Find a component by name
    pub fn find_component(&self, name: &str) -> Option<ComponentId> {
        self.components
            .iter()
            .position(|component| component.name == name)
            .map(ComponentId::new)
    }

    /// Human-readable outline of the graph, used by verbose logging
    pub fn render(&self) -> String {
        let mut out = String::new();
        for module in &self.modules {
            let _ = writeln!(out, "module {}", module.name);
            for id in &module.providers {
                let provider = self.provider(*id);
                let parameters: Vec<String> = provider
                    .parameters
                    .iter()
                    .map(|ty| self.types.display(*ty).to_string())
                    .collect();
                let _ = writeln!(
                    out,
                    "  provide {}({}): {}",
                    provider.name,
                    parameters.join(", "),
                    self.types.display(provider.returns)
                );
            }
            for included in &module.includes {
                let _ = writeln!(out, "  include {}", self.module(*included).name);
            }
            for ty in &module.requires {
                let _ = writeln!(out, "  require {}", self.types.display(*ty));
            }
        }
        for component in &self.components {
            let _ = writeln!(
                out,
                "component {} ({})",
                component.name,
                self.module(component.module).name
            );
            for resolver in &component.resolvers {
                let _ = writeln!(
                    out,
                    "  {}(): {}",
                    resolver.name,
                    self.types.display(resolver.returns)
                );
            }
        }
        out
    }
}

/// Incremental constructor for a [`Graph`]
///
/// Module and component names must be unique; identifiers returned by one
/// builder are only meaningful for the graph it builds.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Type table used to intern descriptors for this graph
    pub fn types_mut(&mut self) -> &mut TypeTable {
        &mut self.graph.types
    }

    /// Read access to the graph assembled so far
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Declare a module
    pub fn add_module(
        &mut self,
        name: impl Into<String>,
        source: impl AsRef<Path>,
    ) -> Result<ModuleId> {
        let name = name.into();
        if self.graph.find_module(&name).is_some() {
            return Err(Error::manifest(format!("duplicate module `{name}`")));
        }
        let id = ModuleId::new(self.graph.modules.len());
        self.graph.modules.push(Module {
            name,
            source: source.as_ref().to_path_buf(),
            providers: Vec::new(),
            includes: Vec::new(),
            requires: BTreeSet::new(),
        });
        Ok(id)
    }

    /// Declare a provider on `module`
    ///
    /// A deferred provider whose return type is not yet wrapped gets wrapped
    /// in `Promise`; a provider already returning `Promise<T>` is deferred.
    pub fn add_provider(
        &mut self,
        module: ModuleId,
        name: impl Into<String>,
        parameters: Vec<TypeId>,
        returns: TypeId,
        deferred: bool,
    ) -> ProviderId {
        let types = &mut self.graph.types;
        let already_wrapped = types.is_async_wrapper(returns);
        let returns = if deferred && !already_wrapped {
            types.promise_of(returns)
        } else {
            returns
        };
        let id = ProviderId::new(self.graph.providers.len());
        self.graph.providers.push(Provider {
            name: name.into(),
            module,
            parameters,
            returns,
            deferred: deferred || already_wrapped,
        });
        self.graph.modules[module.index()].providers.push(id);
        id
    }

    /// Make `included` visible from `module`
    pub fn include(&mut self, module: ModuleId, included: ModuleId) {
        let includes = &mut self.graph.modules[module.index()].includes;
        if !includes.contains(&included) {
            includes.push(included);
        }
    }

    /// Declare that `module` expects `ty` from its enclosing context
    pub fn require(&mut self, module: ModuleId, ty: TypeId) {
        self.graph.modules[module.index()].requires.insert(ty);
    }

    /// Declare a component anchored at `module`
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        source: impl AsRef<Path>,
        module: ModuleId,
    ) -> Result<ComponentId> {
        let name = name.into();
        if self.graph.find_component(&name).is_some() {
            return Err(Error::manifest(format!("duplicate component `{name}`")));
        }
        let id = ComponentId::new(self.graph.components.len());
        self.graph.components.push(Component {
            name,
            source: source.as_ref().to_path_buf(),
            module,
            resolvers: Vec::new(),
        });
        Ok(id)
    }

    /// Declare a resolver on `component`
    pub fn add_resolver(&mut self, component: ComponentId, name: impl Into<String>, returns: TypeId) {
        self.graph.components[component.index()]
            .resolvers
            .push(Resolver {
                name: name.into(),
                returns,
            });
    }

    /// Finish the graph
    pub fn build(self) -> Graph {
        self.graph
    }
}
