//! Configuration loading and types for folio.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

mod load;
mod types;

// Re-export all types for convenient access
pub use load::{DEFAULT_CONFIG_FILE, absolute_config_path, base_path_from_config};
pub use types::{
    Config, ContentConfig, I18nConfig, MarkdownConfig, ReloadPolicy, SiteConfig, StoreConfig,
    resolve_path,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("{}", format_parse_error(.0))]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid markdown configuration: {0}")]
    Markdown(#[from] crate::content::MarkdownError),
}

/// Format a config deserialization error with helpful context
fn format_parse_error(e: &serde_yaml::Error) -> String {
    let msg = e.to_string();

    if msg.contains("missing field `site`") {
        return "invalid config: 'site' section is required\n\nExample:\n  site:\n    name: My Portfolio".to_string();
    }
    if msg.contains("missing field `name`") {
        return "invalid config: missing required 'site.name' field".to_string();
    }

    format!("invalid config: {msg}")
}
