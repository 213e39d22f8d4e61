//! Domain Services
//!
//! The pure planning pipeline: resolve, aggregate, generate.
//!
//! ## Domain Services
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`TypeResolver`] | Enumerates candidate plans for a type in a module context |
//! | [`ResolutionAggregator`] | Enforces one plan per resolver and collects sub-plans |
//! | [`ImplementationGenerator`] | Builds class descriptions and output files |

/// Resolution aggregation per component
pub mod aggregation;
/// Class description generation
pub mod generation;
/// Type resolution engine
pub mod type_resolution;

pub use aggregation::ResolutionAggregator;
pub use generation::{ImplementationGenerator, import_specifier, output_path};
pub use type_resolution::TypeResolver;
