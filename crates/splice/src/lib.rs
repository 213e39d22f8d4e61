//! # Splice
//!
//! Compile-time dependency injection: reads module, provider and component
//! declarations, proves every resolver of every component can be satisfied,
//! and generates the implementation classes that wire them together.
//!
//! ## Example
//!
//! ```ignore
//! use splice::{RunOptions, run};
//!
//! let report = run(&RunOptions {
//!     project: Some("splice-manifest.toml".into()),
//!     ..RunOptions::default()
//! })?;
//! println!("generated {} files", report.files.len());
//! ```
//!
//! ## Architecture
//!
//! - `domain` - graph, type model, resolution plans, errors and ports
//! - `application` - resolution engine, aggregator, generator and the generation use case
//! - `infrastructure` - configuration, logging, manifest reader, printer and emitters

/// Domain layer - graph model, type descriptors and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use splice_domain::*;
}

/// Application layer - resolution and generation services
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use splice_application::*;
}

/// Infrastructure layer - configuration, logging, manifests and emitters
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use splice_infrastructure::*;
}

pub mod cli;
pub mod init;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{GenerationReport, GenerationService};
pub use cli::Cli;
pub use init::{RunOptions, execute, run};
