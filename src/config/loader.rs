//! Configuration loading from disk.

use std::path::Path;

use thiserror::Error;

use crate::config::schema::GateConfig;
use crate::config::validation::{normalize_config, validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for the schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation failed.
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
///
/// Malformed admission-control values are replaced with defaults and
/// logged; only structural problems abort the load.
pub fn load_config(path: &Path) -> Result<GateConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: GateConfig = toml::from_str(&content)?;

    for adjustment in normalize_config(&mut config) {
        tracing::warn!(config_path = %path.display(), "{adjustment}");
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
