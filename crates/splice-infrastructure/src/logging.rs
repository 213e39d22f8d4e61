//! Structured logging with tracing
//!
//! Configures the global subscriber from [`LoggingConfig`]: level filter
//! (overridable through `SPLICE_LOG`), plain or JSON formatting on stderr,
//! and an optional daily-rotated log file. Stdout is left to generated
//! output so dry runs can be piped.

use splice_domain::error::{Error, Result};

pub use crate::config::LoggingConfig;
use crate::constants::{LOG_FILE_PREFIX, LOG_FILTER_ENV};
use crate::error_ext::ErrorContext;
use tracing::{Level, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with the provided configuration
///
/// Fails when a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(&config.level));

    let file_appender = config
        .file_output
        .as_ref()
        .map(|path| {
            let prefix = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(LOG_FILE_PREFIX);
            RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(prefix)
                .max_log_files(config.max_files)
                .build(
                    path.parent()
                        .filter(|dir| !dir.as_os_str().is_empty())
                        .unwrap_or_else(|| std::path::Path::new(".")),
                )
                .config_context(format!("Failed to open log file {}", path.display()))
        })
        .transpose()?;

    // json and plain layers have different types, hence the separate branches
    let initialized = if config.json_format {
        let stderr = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stderr).with(file).try_init()
        } else {
            registry.with(stderr).try_init()
        }
    } else {
        let stderr = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false);
        let registry = Registry::default().with(filter);
        if let Some(appender) = file_appender {
            let file = fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true);
            registry.with(stderr).with(file).try_init()
        } else {
            registry.with(stderr).try_init()
        }
    };
    initialized.config_context("Failed to install the logging subscriber")?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &std::path::Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}
