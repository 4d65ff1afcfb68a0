//! Typed metadata coerced from frontmatter.
//!
//! Coercion never fails: every field takes the frontmatter value when it is
//! present and well-shaped, and its default otherwise. A value of the wrong
//! shape (a string where a list is expected, an unknown category) is treated
//! the same as a missing one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::frontmatter::FrontmatterRecord;
use crate::i18n::Localized;

// =============================================================================
// Enumerated fields
// =============================================================================

/// What kind of thing a work or project is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Web,
    Mobile,
    Desktop,
    Other,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Web,
        Category::Mobile,
        Category::Desktop,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Web => "web",
            Category::Mobile => "mobile",
            Category::Desktop => "desktop",
            Category::Other => "other",
        }
    }
}

/// Lifecycle state of a work or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Completed,
    InProgress,
    Archived,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Completed, Status::InProgress, Status::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Completed => "completed",
            Status::InProgress => "in-progress",
            Status::Archived => "archived",
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown {field} '{value}'")]
pub struct UnknownVariant {
    field: &'static str,
    value: String,
}

macro_rules! string_enum {
    ($ty:ident, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }
    };
}

string_enum!(Category, "category");
string_enum!(Status, "status");

/// Read an enumerated field, treating unknown values as missing.
fn get_variant<T: FromStr>(record: &FrontmatterRecord, key: &str) -> Option<T> {
    let raw = record.get_str(key)?;
    match raw.parse() {
        Ok(variant) => Some(variant),
        Err(_) => {
            tracing::debug!(key, value = raw, "unknown value; using default");
            None
        }
    }
}

fn get_string(record: &FrontmatterRecord, key: &str) -> Option<String> {
    record.get_str(key).map(str::to_string)
}

// =============================================================================
// Blog posts
// =============================================================================

/// Metadata for one blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMetadata {
    /// Unique post id, also the URL slug
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub tags: Vec<String>,
    /// Publication date (YYYY-MM-DD)
    pub published_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Drafts set this to false; posts are published unless they say otherwise
    pub published: bool,
    /// Zenn URL for posts migrated from Zenn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zenn_url: Option<String>,
    /// Like count recorded at migration time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zenn_likes: Option<u64>,
    /// Explicit position; posts without one fall back to date order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

impl BlogMetadata {
    /// Build blog metadata from frontmatter, filling defaults.
    ///
    /// A missing `id` falls back to the file slug.
    pub fn coerce(record: &FrontmatterRecord, slug: &str) -> Self {
        Self {
            id: record.get_non_empty_str("id").unwrap_or(slug).to_string(),
            title: record.get_localized("title").unwrap_or_default(),
            description: record.get_localized("description").unwrap_or_default(),
            tags: record.get_string_list("tags").unwrap_or_default(),
            published_at: get_string(record, "publishedAt").unwrap_or_default(),
            updated_at: get_string(record, "updatedAt"),
            thumbnail: get_string(record, "thumbnail"),
            published: record.get_bool("published").unwrap_or(true),
            zenn_url: get_string(record, "zennUrl"),
            zenn_likes: record.get_u64("zennLikes"),
            order: record.get_i64("order"),
        }
    }
}

// =============================================================================
// Works and projects
// =============================================================================

/// Images attached to a work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    pub thumbnail: String,
    pub gallery: Vec<String>,
}

/// External links for a work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Metadata for one work (portfolio piece).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkMetadata {
    /// Unique work id, also the URL slug
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    /// Card blurb
    pub short_description: Localized,
    pub technologies: Vec<String>,
    pub category: Category,
    pub status: Status,
    /// Start date (YYYY-MM-DD)
    pub start_date: String,
    /// End date, absent while in progress
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub images: Images,
    pub links: Links,
    /// Highlighted on the home page
    pub featured: bool,
    /// Display position, lowest first
    pub order: i64,
}

impl WorkMetadata {
    /// Build work metadata from frontmatter, filling defaults.
    ///
    /// A missing `id` falls back to the file slug.
    pub fn coerce(record: &FrontmatterRecord, slug: &str) -> Self {
        let images = record.get_record("images").unwrap_or_default();
        let links = record.get_record("links").unwrap_or_default();

        Self {
            id: record.get_non_empty_str("id").unwrap_or(slug).to_string(),
            title: record.get_localized("title").unwrap_or_default(),
            description: record.get_localized("description").unwrap_or_default(),
            short_description: record.get_localized("shortDescription").unwrap_or_default(),
            technologies: record.get_string_list("technologies").unwrap_or_default(),
            category: get_variant(record, "category").unwrap_or_default(),
            status: get_variant(record, "status").unwrap_or_default(),
            start_date: get_string(record, "startDate").unwrap_or_default(),
            end_date: get_string(record, "endDate"),
            images: Images {
                thumbnail: get_string(&images, "thumbnail").unwrap_or_default(),
                gallery: images.get_string_list("gallery").unwrap_or_default(),
            },
            links: Links {
                demo: get_string(&links, "demo"),
                github: get_string(&links, "github"),
                website: get_string(&links, "website"),
            },
            featured: record.get_bool("featured").unwrap_or(false),
            order: record.get_i64("order").unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_scenario() {
        let record = FrontmatterRecord::parse(
            "id: post-1\ntags: [TypeScript, Svelte]\npublishedAt: 2024-01-01\npublished: true\n",
        );
        let meta = BlogMetadata::coerce(&record, "ignored");

        assert_eq!(meta.id, "post-1");
        assert_eq!(meta.tags, vec!["TypeScript", "Svelte"]);
        assert_eq!(meta.published_at, "2024-01-01");
        assert!(meta.published);
        assert_eq!(meta.title, Localized::new("", ""));
        assert_eq!(meta.description, Localized::new("", ""));
        assert_eq!(meta.order, None);
    }

    #[test]
    fn test_blog_defaults_from_empty_record() {
        let meta = BlogMetadata::coerce(&FrontmatterRecord::default(), "hello-world");
        assert_eq!(meta.id, "hello-world");
        assert_eq!(meta.title, Localized::default());
        assert!(meta.tags.is_empty());
        assert_eq!(meta.published_at, "");
        assert!(meta.published);
        assert_eq!(meta.updated_at, None);
        assert_eq!(meta.thumbnail, None);
        assert_eq!(meta.zenn_url, None);
        assert_eq!(meta.zenn_likes, None);
    }

    #[test]
    fn test_blog_draft_and_zenn_fields() {
        let record = FrontmatterRecord::parse(
            "published: false\nzennUrl: https://zenn.dev/x/articles/y\nzennLikes: 12\norder: 4\n",
        );
        let meta = BlogMetadata::coerce(&record, "y");
        assert!(!meta.published);
        assert_eq!(meta.zenn_url.as_deref(), Some("https://zenn.dev/x/articles/y"));
        assert_eq!(meta.zenn_likes, Some(12));
        assert_eq!(meta.order, Some(4));
    }

    #[test]
    fn test_blog_wrong_shapes_use_defaults() {
        let record = FrontmatterRecord::parse("id: 7\ntags: rust\npublished: maybe\n");
        let meta = BlogMetadata::coerce(&record, "slug");
        assert_eq!(meta.id, "slug");
        assert!(meta.tags.is_empty());
        assert!(meta.published);
    }

    #[test]
    fn test_work_full_record() {
        let yaml = r#"
id: folio
title:
  ja: ポートフォリオ
  en: Portfolio
shortDescription:
  ja: 短い説明
  en: Short
technologies: [Rust, Svelte]
category: desktop
status: in-progress
startDate: 2023-04-01
images:
  thumbnail: /img/folio.png
  gallery: [/img/1.png, /img/2.png]
links:
  github: https://github.com/example/folio
featured: true
order: 2
"#;
        let meta = WorkMetadata::coerce(&FrontmatterRecord::parse(yaml), "folio");
        assert_eq!(meta.title.en, "Portfolio");
        assert_eq!(meta.short_description.ja, "短い説明");
        assert_eq!(meta.description, Localized::default());
        assert_eq!(meta.category, Category::Desktop);
        assert_eq!(meta.status, Status::InProgress);
        assert_eq!(meta.start_date, "2023-04-01");
        assert_eq!(meta.end_date, None);
        assert_eq!(meta.images.gallery.len(), 2);
        assert_eq!(meta.links.github.as_deref(), Some("https://github.com/example/folio"));
        assert_eq!(meta.links.demo, None);
        assert!(meta.featured);
        assert_eq!(meta.order, 2);
    }

    #[test]
    fn test_work_defaults_from_empty_record() {
        let meta = WorkMetadata::coerce(&FrontmatterRecord::default(), "untitled");
        assert_eq!(meta.id, "untitled");
        assert_eq!(meta.category, Category::Web);
        assert_eq!(meta.status, Status::Completed);
        assert_eq!(meta.images, Images::default());
        assert_eq!(meta.links, Links::default());
        assert!(!meta.featured);
        assert_eq!(meta.order, 0);
    }

    #[test]
    fn test_unknown_category_uses_default() {
        let record = FrontmatterRecord::parse("category: console\nstatus: abandoned\n");
        let meta = WorkMetadata::coerce(&record, "x");
        assert_eq!(meta.category, Category::Web);
        assert_eq!(meta.status, Status::Completed);
    }

    #[test]
    fn test_enum_strings_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert!("done".parse::<Status>().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let meta = BlogMetadata::coerce(&FrontmatterRecord::parse("publishedAt: 2024-01-01"), "a");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["publishedAt"], "2024-01-01");
        assert!(json.get("updatedAt").is_none());
    }
}
