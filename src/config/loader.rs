//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::DeployerConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and resolution.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),

    /// One or more required environment variables are absent or empty.
    #[error("Missing required environment variable(s): {}. Deployment halted.", .0.join(", "))]
    MissingVars(Vec<String>),

    #[error("Invalid address in {var}: {reason}")]
    InvalidAddress { var: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unknown network '{0}'")]
    UnknownNetwork(String),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DeployerConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: DeployerConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Load the file at `path` if given, otherwise validate and return defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<DeployerConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = load_config(path)?;
            tracing::info!(path = %path.display(), "Configuration file loaded");
            Ok(config)
        }
        None => {
            let config = DeployerConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}
