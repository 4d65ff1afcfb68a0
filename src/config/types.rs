//! Configuration type definitions.
//!
//! This module contains all the data structures used in `folio.yaml`.
//! These types are pure data - no I/O or complex logic.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

// =============================================================================
// Root config
// =============================================================================

/// Site configuration loaded from `folio.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub url: Option<String>,
    /// Where `folio export` writes route data
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("_site")
}

// =============================================================================
// Content directories
// =============================================================================

/// Directories holding the markdown sources for each content kind.
///
/// Relative paths are resolved against the config file's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_blog_dir")]
    pub blog: PathBuf,
    #[serde(default = "default_works_dir")]
    pub works: PathBuf,
    #[serde(default = "default_projects_dir")]
    pub projects: PathBuf,
}

fn default_blog_dir() -> PathBuf {
    PathBuf::from("content/blog")
}

fn default_works_dir() -> PathBuf {
    PathBuf::from("content/works")
}

fn default_projects_dir() -> PathBuf {
    PathBuf::from("content/projects")
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            blog: default_blog_dir(),
            works: default_works_dir(),
            projects: default_projects_dir(),
        }
    }
}

/// Resolve a possibly-relative path against `base_path`.
pub fn resolve_path(path: &Path, base_path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable on top of CommonMark (none by default)
    #[serde(default)]
    pub extensions: Vec<String>,
}

// =============================================================================
// Internationalization
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Locale used when nothing else picks one
    #[serde(default)]
    pub default_locale: Locale,
}

// =============================================================================
// Store configuration
// =============================================================================

/// When content stores re-read their source documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReloadPolicy {
    /// Re-read every document on every query
    #[default]
    Always,
    /// Load once, then only on an explicit reload
    Manual,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub reload: ReloadPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config: Config = serde_yaml::from_str("site:\n  name: My Folio\n").unwrap();
        assert_eq!(config.site.name, "My Folio");
        assert_eq!(config.site.output, PathBuf::from("_site"));
        assert_eq!(config.content.blog, PathBuf::from("content/blog"));
        assert_eq!(config.content.works, PathBuf::from("content/works"));
        assert!(config.markdown.extensions.is_empty());
        assert_eq!(config.i18n.default_locale, Locale::Ja);
        assert_eq!(config.store.reload, ReloadPolicy::Always);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
site:
  name: Portfolio
  url: https://example.com
  output: dist
content:
  blog: posts
markdown:
  extensions: [tables, footnotes]
i18n:
  default_locale: en
store:
  reload: manual
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.site.url.as_deref(), Some("https://example.com"));
        assert_eq!(config.site.output, PathBuf::from("dist"));
        assert_eq!(config.content.blog, PathBuf::from("posts"));
        assert_eq!(config.content.projects, PathBuf::from("content/projects"));
        assert_eq!(config.markdown.extensions, vec!["tables", "footnotes"]);
        assert_eq!(config.i18n.default_locale, Locale::En);
        assert_eq!(config.store.reload, ReloadPolicy::Manual);
    }

    #[test]
    fn test_resolve_path() {
        let base = Path::new("/site");
        assert_eq!(resolve_path(Path::new("content"), base), PathBuf::from("/site/content"));
        assert_eq!(resolve_path(Path::new("/abs"), base), PathBuf::from("/abs"));
    }
}
