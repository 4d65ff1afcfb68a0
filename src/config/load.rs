//! Configuration loading from files.
//!
//! This module handles reading, parsing and validating configuration files.

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};
use crate::content::MarkdownOptions;

/// Default config file name, looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "folio.yaml";

impl Config {
    /// Load the config from the command line argument, defaulting to `folio.yaml`
    pub async fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config_file = absolute_config_path(config_file)?;
        Self::load_from_file(&config_file).await
    }

    /// Load the config from a file path
    async fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), site = %config.site.name, "loaded config");
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        MarkdownOptions::from_config(&self.markdown)?;
        Ok(())
    }
}

/// Resolve the config file argument to an absolute path.
pub fn absolute_config_path(config_file: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
    if config_file.is_relative() {
        Ok(std::env::current_dir()
            .map_err(ConfigError::CwdFailure)?
            .join(config_file))
    } else {
        Ok(config_file.to_path_buf())
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
