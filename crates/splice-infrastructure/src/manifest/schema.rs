//! Serialized declaration manifest
//!
//! The on-disk form of a declaration graph. Type positions hold type
//! expressions (see [`super::type_expr`]) and are lowered when the graph is
//! built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use splice_domain::error::{Error, Result};

/// Root manifest document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Source file for declarations that name none
    pub source: Option<PathBuf>,
    pub classes: Vec<ClassDecl>,
    pub enums: Vec<EnumDecl>,
    pub aliases: Vec<AliasDecl>,
    pub modules: Vec<ModuleDecl>,
    pub components: Vec<ComponentDecl>,
}

/// Nominal class with an optional structural shape
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassDecl {
    pub name: String,
    /// Field name to type expression; a trailing `?` on the name marks it optional
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
}

/// Named type expression
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleDecl {
    pub name: String,
    pub source: Option<PathBuf>,
    /// Names of included modules
    pub includes: Vec<String>,
    /// Type expressions the module expects from its enclosing context
    pub requires: Vec<String>,
    pub providers: Vec<ProviderDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderDecl {
    pub name: String,
    pub parameters: Vec<String>,
    pub returns: String,
    pub deferred: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentDecl {
    pub name: String,
    pub source: Option<PathBuf>,
    /// Root module name
    pub module: String,
    pub resolvers: Vec<ResolverDecl>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverDecl {
    pub name: String,
    pub returns: String,
}

/// Serialization format of a manifest file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
    Yaml,
}

impl ManifestFormat {
    /// Format implied by a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::manifest(format!(
                "unsupported manifest format: {}",
                path.display()
            ))),
        }
    }
}
