//! Configuration Tests

use std::fs;
use std::path::PathBuf;

use splice_domain::error::Error;
use splice_infrastructure::config::{AppConfig, ConfigLoader, GenerationConfig};
use splice_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

fn loader_for(content: &str) -> (TempDir, ConfigLoader) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("splice.toml");
    fs::write(&path, content).unwrap();
    let loader = ConfigLoader::new().with_config_path(&path);
    (temp_dir, loader)
}

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    assert_eq!(
        config.generation,
        GenerationConfig {
            project: None,
            parallel: true,
            dry_run: false,
        }
    );
}

#[test]
fn test_missing_config_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(temp_dir.path().join("absent.toml"));

    let config = loader.load().unwrap();

    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_file_values_override_defaults() {
    let (_dir, loader) = loader_for(
        r#"
[logging]
level = "debug"
json_format = true

[generation]
parallel = false
dry_run = true
"#,
    );

    let config = loader.load().unwrap();

    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json_format);
    assert!(!config.generation.parallel);
    assert!(config.generation.dry_run);
}

#[test]
fn test_relative_project_resolves_against_config_dir() {
    let (dir, loader) = loader_for("[generation]\nproject = \"app/splice-manifest.toml\"\n");

    let config = loader.load().unwrap();

    assert_eq!(
        config.generation.project,
        Some(dir.path().join("app/splice-manifest.toml"))
    );
}

#[test]
fn test_absolute_project_is_kept() {
    let (_dir, loader) = loader_for("[generation]\nproject = \"/srv/app/manifest.json\"\n");

    let config = loader.load().unwrap();

    assert_eq!(
        config.generation.project,
        Some(PathBuf::from("/srv/app/manifest.json"))
    );
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let (_dir, loader) = loader_for("[logging]\nlevel = \"chatty\"\n");

    match loader.load() {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("chatty")),
        other => panic!("Expected Configuration error, got {other:?}"),
    }
}

#[test]
fn test_zero_max_files_with_file_output_is_rejected() {
    let (_dir, loader) = loader_for("[logging]\nfile_output = \"logs/splice.log\"\nmax_files = 0\n");

    assert!(matches!(loader.load(), Err(Error::Configuration { .. })));
}

#[test]
fn test_malformed_toml_is_a_configuration_error() {
    let (_dir, loader) = loader_for("[generation\nparallel = ");

    assert!(matches!(loader.load(), Err(Error::Configuration { .. })));
}
