//! Generation run initialization
//!
//! Loads configuration, applies command line overrides, installs logging and
//! wires the manifest source and emitter into a [`GenerationService`].

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use splice_application::{GenerationReport, GenerationService};
use splice_domain::error::{Error, Result};
use splice_domain::ports::ImplementationEmitter;
use splice_infrastructure::config::{AppConfig, ConfigLoader};
use splice_infrastructure::emission::{FileSystemEmitter, StdoutEmitter};
use splice_infrastructure::error_ext::ErrorContext;
use splice_infrastructure::logging::init_logging;
use splice_infrastructure::manifest::{ManifestGraphSource, find_manifest};
use tracing::info;

/// Options of one invocation; `None` / `false` defer to configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub project: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub dry_run: bool,
    pub sequential: bool,
}

impl RunOptions {
    /// Apply these options on top of loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(project) = &self.project {
            config.generation.project = Some(project.clone());
        }
        if self.dry_run {
            config.generation.dry_run = true;
        }
        if self.sequential {
            config.generation.parallel = false;
        }
    }
}

/// Run Splice
///
/// This is the main entry point: it loads configuration, initializes logging
/// and generates every component of the declaration manifest.
pub fn run(options: &RunOptions) -> Result<GenerationReport> {
    let mut config = load_config(options)?;
    options.apply(&mut config);
    init_logging(&config.logging)?;
    execute(&config)
}

/// Generate implementations as configured, without touching global logging state
pub fn execute(config: &AppConfig) -> Result<GenerationReport> {
    let manifest = match &config.generation.project {
        Some(path) => path.clone(),
        None => {
            let cwd = env::current_dir().io_context("Failed to read working directory")?;
            find_manifest(&cwd).ok_or_else(|| {
                Error::manifest(format!(
                    "no declaration manifest found in {} or its parents",
                    cwd.display()
                ))
            })?
        }
    };

    let emitter: Arc<dyn ImplementationEmitter> = if config.generation.dry_run {
        Arc::new(StdoutEmitter::new())
    } else {
        Arc::new(FileSystemEmitter::new())
    };
    info!(
        manifest = %manifest.display(),
        emitter = emitter.name(),
        parallel = config.generation.parallel,
        "Starting generation"
    );

    GenerationService::new(Arc::new(ManifestGraphSource::new(manifest)), emitter)
        .with_parallel(config.generation.parallel)
        .run()
}

/// Load configuration from the optional path
fn load_config(options: &RunOptions) -> Result<AppConfig> {
    let loader = match &options.config {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.load()
}
