//! Manifest loading and graph construction

use std::fs;
use std::path::{Path, PathBuf};

use splice_domain::error::{Error, Result};
use splice_domain::ports::GraphSource;
use splice_domain::{Graph, GraphBuilder, ModuleId};
use tracing::{debug, info};

use super::schema::{ClassDecl, Manifest, ManifestFormat};
use super::type_expr::{self, FieldExpr, TypeScope};
use crate::constants::{DEFAULT_SOURCE_FILE, MANIFEST_BASENAME, MANIFEST_EXTENSIONS};
use crate::error_ext::ErrorContext;

/// Graph source reading a declaration manifest from disk
#[derive(Debug, Clone)]
pub struct ManifestGraphSource {
    path: PathBuf,
}

impl ManifestGraphSource {
    /// Create a source for the manifest at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphSource for ManifestGraphSource {
    fn load_graph(&self) -> Result<Graph> {
        let manifest = load_manifest(&self.path)?;
        let base_dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let graph = build_graph(&manifest, base_dir)?;
        info!(
            "Loaded {} modules and {} components from {}",
            graph.modules().len(),
            graph.components().len(),
            self.path.display()
        );
        Ok(graph)
    }

    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }
}

/// Read and decode a manifest, choosing the format from the file extension
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let format = ManifestFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .io_context(format!("Failed to read manifest {}", path.display()))?;
    parse_manifest(&content, format).map_err(|error| match error {
        Error::Manifest { message } => {
            Error::manifest(format!("{}: {message}", path.display()))
        }
        other => other,
    })
}

/// Decode manifest text in the given format
pub fn parse_manifest(content: &str, format: ManifestFormat) -> Result<Manifest> {
    match format {
        ManifestFormat::Toml => toml::from_str(content).manifest_context("invalid TOML"),
        ManifestFormat::Json => serde_json::from_str(content).manifest_context("invalid JSON"),
        ManifestFormat::Yaml => serde_yaml::from_str(content).manifest_context("invalid YAML"),
    }
}

/// Search `start` and its ancestors for `splice-manifest.{toml,json,yaml,yml}`
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        MANIFEST_EXTENSIONS
            .iter()
            .map(|extension| dir.join(format!("{MANIFEST_BASENAME}.{extension}")))
            .find(|candidate| candidate.is_file())
    })
}

/// Build a declaration graph from a decoded manifest
///
/// Relative source paths are resolved against `base_dir`. Every module is
/// declared before any `includes` edge is wired, so declaration order in the
/// manifest does not matter.
pub fn build_graph(manifest: &Manifest, base_dir: &Path) -> Result<Graph> {
    let scope = declare_types(manifest)?;
    let mut builder = Graph::builder();
    define_classes(&manifest.classes, &scope, &mut builder)?;

    let default_source = manifest
        .source
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE_FILE));
    let source_of = |declared: &Option<PathBuf>| {
        let source = declared.as_ref().unwrap_or(&default_source);
        if source.is_absolute() {
            source.clone()
        } else {
            base_dir.join(source)
        }
    };

    let module_ids = manifest
        .modules
        .iter()
        .map(|decl| builder.add_module(decl.name.clone(), source_of(&decl.source)))
        .collect::<Result<Vec<_>>>()?;

    for (decl, &module) in manifest.modules.iter().zip(&module_ids) {
        for included in &decl.includes {
            let target = lookup_module(&builder, included, &decl.name)?;
            builder.include(module, target);
        }
        for required in &decl.requires {
            let ty = scope.resolve(required, builder.types_mut())?;
            builder.require(module, ty);
        }
        for provider in &decl.providers {
            let parameters = provider
                .parameters
                .iter()
                .map(|parameter| scope.resolve(parameter, builder.types_mut()))
                .collect::<Result<Vec<_>>>()?;
            let returns = scope.resolve(&provider.returns, builder.types_mut())?;
            builder.add_provider(
                module,
                provider.name.clone(),
                parameters,
                returns,
                provider.deferred,
            );
        }
        debug!(
            "Declared module {} with {} providers",
            decl.name,
            decl.providers.len()
        );
    }

    for decl in &manifest.components {
        let module = lookup_module(&builder, &decl.module, &decl.name)?;
        let component = builder.add_component(decl.name.clone(), source_of(&decl.source), module)?;
        for resolver in &decl.resolvers {
            let ty = scope.resolve(&resolver.returns, builder.types_mut())?;
            builder.add_resolver(component, resolver.name.clone(), ty);
        }
    }

    Ok(builder.build())
}

fn declare_types(manifest: &Manifest) -> Result<TypeScope> {
    let mut scope = TypeScope::new();
    for decl in &manifest.enums {
        scope.enumeration(decl.name.clone());
    }
    for decl in &manifest.aliases {
        scope.alias(decl.name.clone(), type_expr::parse(&decl.ty)?)?;
    }
    Ok(scope)
}

fn define_classes(
    classes: &[ClassDecl],
    scope: &TypeScope,
    builder: &mut GraphBuilder,
) -> Result<()> {
    for (index, decl) in classes.iter().enumerate() {
        if classes[..index].iter().any(|other| other.name == decl.name) {
            return Err(Error::manifest(format!("duplicate class `{}`", decl.name)));
        }
        let fields = decl
            .fields
            .iter()
            .map(|(key, expression)| {
                let (name, optional) = match key.strip_suffix('?') {
                    Some(name) => (name, true),
                    None => (key.as_str(), false),
                };
                Ok(FieldExpr {
                    name: name.to_string(),
                    optional,
                    ty: type_expr::parse(expression)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let types = builder.types_mut();
        let fields = scope.lower_shape(&fields, types)?;
        types.define_class_fields(decl.name.clone(), fields);
    }
    Ok(())
}

fn lookup_module(builder: &GraphBuilder, name: &str, referrer: &str) -> Result<ModuleId> {
    builder
        .graph()
        .find_module(name)
        .ok_or_else(|| Error::manifest(format!("unknown module `{name}` referenced by `{referrer}`")))
}
