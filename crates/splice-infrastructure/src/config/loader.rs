//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values.

use crate::config::AppConfig;
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use splice_domain::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables with prefix (e.g., `SPLICE_GENERATION__DRY_RUN`)
    ///
    /// A relative `generation.project` read from a file is resolved against
    /// that file's directory.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let config_file = match &self.config_path {
            Some(config_path) if config_path.exists() => {
                log_config_loaded(config_path, true);
                Some(config_path.clone())
            }
            Some(config_path) => {
                log_config_loaded(config_path, false);
                None
            }
            None => Self::find_default_config_path().inspect(|path| log_config_loaded(path, true)),
        };
        if let Some(path) = &config_file {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(
            Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split(CONFIG_ENV_SEPARATOR),
        );

        let mut app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        if let Some(base) = config_file.as_deref().and_then(Path::parent)
            && let Some(project) = app_config
                .generation
                .project
                .as_mut()
                .filter(|project| project.is_relative())
        {
            *project = base.join(&*project);
        }

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Find default configuration file paths to try
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME));
        }
        if let Some(dir) = dirs::home_dir() {
            candidates.push(
                dir.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME),
            );
        }

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
fn validate_app_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    if config.logging.file_output.is_some() && config.logging.max_files == 0 {
        return Err(Error::configuration(
            "logging.max_files cannot be 0 when file output is enabled",
        ));
    }
    Ok(())
}
