//! Filtering and ordering of content records.
//!
//! Filters are plain value objects; every field that is unset imposes no
//! constraint, and set fields are combined with AND. Orderings are total and
//! deterministic: unparseable dates always sort last, and callers sort with a
//! stable sort so ties keep enumeration order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::metadata::{BlogMetadata, Category, Status, WorkMetadata};

// =============================================================================
// Sort options
// =============================================================================

/// How to order a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Most recent date first
    Newest,
    /// Oldest date first
    Oldest,
    /// Japanese title, A to Z
    TitleAsc,
    /// Japanese title, Z to A
    TitleDesc,
    /// Same as `TitleAsc`
    NameAsc,
    /// Same as `TitleDesc`
    NameDesc,
    /// Explicit `order` field, lowest first
    Order,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::Newest,
        SortOption::Oldest,
        SortOption::TitleAsc,
        SortOption::TitleDesc,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::Order,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::TitleAsc => "title-asc",
            SortOption::TitleDesc => "title-desc",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::Order => "order",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
#[error("unknown sort option '{0}' (expected one of: newest, oldest, title-asc, title-desc, name-asc, name-desc, order)")]
pub struct UnknownSortOption(String);

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == s)
            .ok_or_else(|| UnknownSortOption(s.to_string()))
    }
}

// =============================================================================
// Comparators
// =============================================================================

/// Parse a frontmatter date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.naive_utc());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok()
}

/// Compare two date strings, most recent first. Invalid dates sort last.
pub fn compare_newest(a: &str, b: &str) -> Ordering {
    compare_dates(a, b, true)
}

/// Compare two date strings, oldest first. Invalid dates sort last.
pub fn compare_oldest(a: &str, b: &str) -> Ordering {
    compare_dates(a, b, false)
}

fn compare_dates(a: &str, b: &str, descending: bool) -> Ordering {
    match (parse_date(a), parse_date(b)) {
        (Some(a), Some(b)) if descending => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare titles the way a Japanese reader expects.
///
/// Case is ignored, katakana sorts with the matching hiragana and full-width
/// ASCII with its half-width form. Raw code points break remaining ties.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(|c| {
        let folded = match c {
            // Katakana ァ..ヶ -> hiragana ぁ..ゖ
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            // Full-width ASCII -> ASCII
            '\u{FF01}'..='\u{FF5E}' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        };
        folded.to_lowercase()
    })
}

// =============================================================================
// Filters
// =============================================================================

/// Filter options for blog listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogFilter {
    /// Drop drafts
    pub published_only: bool,
    /// Keep only posts carrying this tag
    pub tag: Option<String>,
}

impl BlogFilter {
    pub fn published() -> Self {
        Self {
            published_only: true,
            ..Self::default()
        }
    }

    pub fn matches(&self, meta: &BlogMetadata) -> bool {
        if self.published_only && !meta.published {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !meta.tags.contains(tag) {
                return false;
            }
        }
        true
    }
}

/// Filter options for work and project listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkFilter {
    pub category: Option<Category>,
    pub status: Option<Status>,
    /// Drop anything still in progress
    pub exclude_in_progress: bool,
    pub featured_only: bool,
    /// Keep only works using this technology
    pub technology: Option<String>,
}

impl WorkFilter {
    pub fn featured() -> Self {
        Self {
            featured_only: true,
            ..Self::default()
        }
    }

    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn matches(&self, meta: &WorkMetadata) -> bool {
        if self.category.is_some_and(|category| meta.category != category) {
            return false;
        }
        if self.status.is_some_and(|status| meta.status != status) {
            return false;
        }
        if self.exclude_in_progress && meta.status == Status::InProgress {
            return false;
        }
        if self.featured_only && !meta.featured {
            return false;
        }
        if let Some(technology) = &self.technology {
            if !meta.technologies.contains(technology) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter::FrontmatterRecord;

    fn blog(yaml: &str) -> BlogMetadata {
        BlogMetadata::coerce(&FrontmatterRecord::parse(yaml), "slug")
    }

    fn work(yaml: &str) -> WorkMetadata {
        WorkMetadata::coerce(&FrontmatterRecord::parse(yaml), "slug")
    }

    #[test]
    fn test_sort_option_parse() {
        assert_eq!("newest".parse::<SortOption>().unwrap(), SortOption::Newest);
        assert_eq!("name-desc".parse::<SortOption>().unwrap(), SortOption::NameDesc);
        assert!("popular".parse::<SortOption>().is_err());
        for option in SortOption::ALL {
            assert_eq!(option.to_string().parse::<SortOption>().unwrap(), option);
        }
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-01").is_some());
        assert!(parse_date("2024-01-01T10:00:00+09:00").is_some());
        assert!(parse_date("2024-01-01T10:00:00").is_some());
        assert!(parse_date("").is_none());
        assert!(parse_date("someday").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }

    #[test]
    fn test_newest_and_oldest() {
        assert_eq!(compare_newest("2024-06-01", "2024-01-01"), Ordering::Less);
        assert_eq!(compare_oldest("2024-06-01", "2024-01-01"), Ordering::Greater);
        assert_eq!(compare_newest("2024-01-01", "2024-01-01"), Ordering::Equal);
    }

    #[test]
    fn test_invalid_dates_sort_last_both_ways() {
        assert_eq!(compare_newest("", "2024-01-01"), Ordering::Greater);
        assert_eq!(compare_oldest("", "2024-01-01"), Ordering::Greater);
        assert_eq!(compare_newest("2024-01-01", "garbage"), Ordering::Less);
        assert_eq!(compare_oldest("garbage", ""), Ordering::Equal);
    }

    #[test]
    fn test_title_collation() {
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_titles("あさ", "イヌ"), Ordering::Less);
        assert_eq!(compare_titles("カメ", "きつね"), Ordering::Less);
        assert_eq!(compare_titles("Ｒｕｓｔ", "python"), Ordering::Greater);
        assert_eq!(compare_titles("rust", "Rust"), Ordering::Greater);
        assert_eq!(compare_titles("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_blog_filter() {
        let draft = blog("published: false\ntags: [Rust]");
        let post = blog("tags: [Rust, Svelte]");

        assert!(BlogFilter::default().matches(&draft));
        assert!(!BlogFilter::published().matches(&draft));

        let svelte = BlogFilter {
            tag: Some("Svelte".to_string()),
            ..BlogFilter::default()
        };
        assert!(svelte.matches(&post));
        assert!(!svelte.matches(&draft));
    }

    #[test]
    fn test_work_filter() {
        let app = work("category: mobile\nstatus: in-progress\ntechnologies: [Flutter]\nfeatured: true");
        let site = work("category: web\ntechnologies: [Svelte]");

        assert!(WorkFilter::default().matches(&app));
        assert!(WorkFilter::featured().matches(&app));
        assert!(!WorkFilter::featured().matches(&site));
        assert!(WorkFilter::category(Category::Web).matches(&site));
        assert!(!WorkFilter::category(Category::Web).matches(&app));

        let finished = WorkFilter {
            exclude_in_progress: true,
            ..WorkFilter::default()
        };
        assert!(!finished.matches(&app));
        assert!(finished.matches(&site));

        let combined = WorkFilter {
            category: Some(Category::Mobile),
            technology: Some("Flutter".to_string()),
            status: Some(Status::InProgress),
            ..WorkFilter::default()
        };
        assert!(combined.matches(&app));
        let wrong_tech = WorkFilter {
            technology: Some("Svelte".to_string()),
            ..combined
        };
        assert!(!wrong_tech.matches(&app));
    }
}
