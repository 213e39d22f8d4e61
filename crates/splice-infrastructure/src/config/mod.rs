//! Configuration
//!
//! | Item | Description |
//! |------|-------------|
//! | [`AppConfig`] | Root configuration (`[logging]`, `[generation]`) |
//! | [`ConfigLoader`] | Figment-based loading from defaults, TOML and environment |

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, GenerationConfig, LoggingConfig};
