//! # Infrastructure Layer
//!
//! Adapters around the Splice engine: reading declarations, writing
//! generated code and the ambient configuration and logging stack.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (`splice.toml` + `SPLICE_` environment) |
//! | [`logging`] | tracing subscriber setup |
//! | [`manifest`] | Declaration manifest reader implementing `GraphSource` |
//! | [`emission`] | TypeScript printer and `ImplementationEmitter` adapters |
//! | [`error_ext`] | Context extension converting foreign errors |
//! | [`constants`] | Infrastructure defaults |

pub mod config;
pub mod constants;
pub mod emission;
pub mod error_ext;
pub mod logging;
pub mod manifest;

pub use config::{AppConfig, ConfigLoader, GenerationConfig, LoggingConfig};
pub use emission::{FileSystemEmitter, InMemoryEmitter, StdoutEmitter};
pub use error_ext::ErrorContext;
pub use manifest::ManifestGraphSource;
