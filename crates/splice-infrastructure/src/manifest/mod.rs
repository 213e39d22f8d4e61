//! Declaration manifest
//!
//! | Item | Description |
//! |------|-------------|
//! | [`schema`] | Serde model of the TOML / JSON / YAML manifest |
//! | [`type_expr`] | Type expression parser and lowering into the type table |
//! | [`loader`] | Graph construction and the [`ManifestGraphSource`] adapter |

pub mod loader;
pub mod schema;
pub mod type_expr;

pub use loader::{ManifestGraphSource, build_graph, find_manifest, load_manifest, parse_manifest};
pub use schema::{Manifest, ManifestFormat};
pub use type_expr::{TypeExpr, TypeScope};
