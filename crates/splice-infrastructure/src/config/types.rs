//! Configuration types

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_MAX_FILES};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,

    /// Generation run configuration
    pub generation: GenerationConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,

    /// Log to file in addition to stderr
    pub file_output: Option<PathBuf>,

    /// Maximum number of rotated files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            max_files: LOG_MAX_FILES,
        }
    }
}

/// Generation run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Declaration manifest; discovered from the working directory when unset
    pub project: Option<PathBuf>,

    /// Resolve components in parallel
    pub parallel: bool,

    /// Print generated files instead of writing them
    pub dry_run: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            project: None,
            parallel: true,
            dry_run: false,
        }
    }
}
