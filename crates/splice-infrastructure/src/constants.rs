//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Naming conventions of generated code are defined in `splice_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "splice.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "splice";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SPLICE";

/// Separator between nested keys in environment variables (`SPLICE_LOGGING__LEVEL`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable holding an `EnvFilter` directive that overrides the level
pub const LOG_FILTER_ENV: &str = "SPLICE_LOG";

/// Maximum number of rotated log files to keep
pub const LOG_MAX_FILES: usize = 7;

/// File name prefix used when the configured log path has no stem
pub const LOG_FILE_PREFIX: &str = "splice";

// ============================================================================
// MANIFEST CONSTANTS
// ============================================================================

/// Base name of a discoverable declaration manifest
pub const MANIFEST_BASENAME: &str = "splice-manifest";

/// Manifest extensions, in discovery order
pub const MANIFEST_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// Source file assumed for declarations that name none
pub const DEFAULT_SOURCE_FILE: &str = "index.ts";

/// Deepest nesting of groups, generics, shapes and array suffixes in a type expression
pub const MAX_TYPE_NESTING: usize = 256;

// ============================================================================
// PRINTER CONSTANTS
// ============================================================================

/// One level of indentation in printed code
pub const PRINTER_INDENT: &str = "    ";
