//! Domain Port Interfaces
//!
//! Boundary contracts between the planner and its collaborators. The
//! application layer depends only on these traits; the infrastructure layer
//! implements them.
//!
//! - [`GraphSource`] - supplies the declaration graph (the extractor side)
//! - [`ImplementationEmitter`] - receives generated files (the emission side)

use crate::entities::Graph;
use crate::error::Result;
use crate::value_objects::GeneratedFile;

// ============================================================================
// Graph Source Interface
// ============================================================================

/// Declaration Extractor Interface
///
/// Produces the immutable [`Graph`] a generation run resolves.
///
/// # Example
///
/// ```no_run
/// use splice_domain::ports::GraphSource;
///
/// fn count_components(source: &dyn GraphSource) -> splice_domain::Result<usize> {
///     let graph = source.load_graph()?;
///     Ok(graph.components().len())
/// }
/// ```
pub trait GraphSource: Send + Sync {
    /// Build the declaration graph
    fn load_graph(&self) -> Result<Graph>;

    /// Short description of where declarations come from, for diagnostics
    fn describe(&self) -> String;
}

// ============================================================================
// Emitter Interface
// ============================================================================

/// Generated Code Sink Interface
///
/// Receives each [`GeneratedFile`] once every component of the graph has
/// been resolved and generated.
pub trait ImplementationEmitter: Send + Sync {
    /// Persist or display one generated file
    fn emit(&self, file: &GeneratedFile) -> Result<()>;

    /// Emitter name for logging
    fn name(&self) -> &str;
}
