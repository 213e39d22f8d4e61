//! Generation Service Use Case
//!
//! Application service for one generation run: load the declaration graph,
//! resolve and generate every component, then hand the files to the emitter.
//! Emission starts only after every component succeeded, so a failing graph
//! never leaves partial output behind.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use splice_domain::error::Result;
use splice_domain::ports::{GraphSource, ImplementationEmitter};
use splice_domain::{ComponentId, GeneratedFile, Graph, Resolution};
use tracing::{debug, info};

use crate::domain_services::{ImplementationGenerator, ResolutionAggregator};

/// Summary of a successful generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Components resolved
    pub components: usize,
    /// Generated files, in emission order
    pub files: Vec<PathBuf>,
    /// Private accessors generated across all classes
    pub accessors: usize,
}

/// Generation service - orchestrates graph loading, planning and emission
pub struct GenerationService {
    source: Arc<dyn GraphSource>,
    emitter: Arc<dyn ImplementationEmitter>,
    parallel: bool,
}

impl GenerationService {
    /// Create a new generation service with injected dependencies
    pub fn new(source: Arc<dyn GraphSource>, emitter: Arc<dyn ImplementationEmitter>) -> Self {
        Self {
            source,
            emitter,
            parallel: true,
        }
    }

    /// Resolve components on the rayon pool (default) or one after another
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run one generation
    pub fn run(&self) -> Result<GenerationReport> {
        let started = Instant::now();
        let graph = self.source.load_graph()?;
        info!(
            source = %self.source.describe(),
            modules = graph.modules().len(),
            components = graph.components().len(),
            "declaration graph loaded"
        );
        debug!("declaration graph:\n{}", graph.render());

        let files = generate_implementations(&graph, self.parallel)?;

        let mut report = GenerationReport {
            components: graph.components().len(),
            ..GenerationReport::default()
        };
        for file in &files {
            self.emitter.emit(file)?;
            report.accessors += file
                .classes
                .iter()
                .flat_map(|class| class.methods())
                .filter(|method| method.visibility == splice_domain::Visibility::Private)
                .count();
            report.files.push(file.path.clone());
            debug!(path = %file.path.display(), emitter = self.emitter.name(), "file emitted");
        }

        info!(
            components = report.components,
            files = report.files.len(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "generation completed"
        );
        Ok(report)
    }
}

/// Resolve and generate every component of `graph`
///
/// Results are collected in component declaration order whether or not the
/// components are resolved in parallel, and the first failing component in
/// that order is reported.
pub fn generate_implementations(graph: &Graph, parallel: bool) -> Result<Vec<GeneratedFile>> {
    let aggregator = ResolutionAggregator::new(graph);
    let components: Vec<ComponentId> = graph.components().map(|(id, _)| id).collect();

    let results: Vec<Result<Resolution>> = if parallel {
        components
            .par_iter()
            .map(|component| aggregator.aggregate(*component))
            .collect()
    } else {
        components
            .iter()
            .map(|component| aggregator.aggregate(*component))
            .collect()
    };
    let resolutions = results.into_iter().collect::<Result<Vec<_>>>()?;

    ImplementationGenerator::new(graph).generate(&resolutions)
}
