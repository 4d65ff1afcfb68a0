//! Content kind descriptors.
//!
//! A [`ContentKind`] tells the generic [`ContentStore`](super::ContentStore)
//! everything that differs between blog posts, works and projects: the
//! metadata shape, the filter type, the comparators and how related content
//! is chosen.

use std::cmp::Ordering;
use std::fmt;
use std::path::Path;

use serde::Serialize;

use super::frontmatter::FrontmatterRecord;
use super::metadata::{BlogMetadata, WorkMetadata};
use super::query::{
    BlogFilter, SortOption, WorkFilter, compare_newest, compare_oldest, compare_titles,
};
use crate::config::ContentConfig;
use crate::i18n::Localized;

/// Describes one kind of content.
pub trait ContentKind: Send + Sync + 'static {
    /// Typed metadata produced by coercion
    type Metadata: Clone + fmt::Debug + Serialize + Send + Sync + 'static;
    /// Filter options accepted by listings
    type Filter: Clone + fmt::Debug + Default + Send + Sync;

    /// Short name used in logs and output paths
    const NAME: &'static str;

    /// The configured source directory for this kind.
    fn directory(content: &ContentConfig) -> &Path;

    /// Build metadata from frontmatter, filling defaults.
    fn coerce(record: &FrontmatterRecord, slug: &str) -> Self::Metadata;

    /// The lookup key.
    fn id(meta: &Self::Metadata) -> &str;

    fn title(meta: &Self::Metadata) -> &Localized;

    /// The date listings show and date sorts use.
    fn date(meta: &Self::Metadata) -> &str;

    /// Tags or technologies, in frontmatter order.
    fn tags(meta: &Self::Metadata) -> &[String];

    fn matches(filter: &Self::Filter, meta: &Self::Metadata) -> bool;

    /// Ordering used when a listing names none.
    fn default_sort() -> SortOption;

    fn compare(a: &Self::Metadata, b: &Self::Metadata, sort: SortOption) -> Ordering;

    /// Filter selecting the candidates for related content.
    fn related_candidates(current: &Self::Metadata) -> Self::Filter;

    /// How strongly `candidate` relates to `current`; higher ranks first.
    fn relevance(current: &Self::Metadata, candidate: &Self::Metadata) -> usize;
}

/// A kind that can flag records as featured.
pub trait FeaturedKind: ContentKind {
    fn featured_filter() -> Self::Filter;
}

// =============================================================================
// Blog
// =============================================================================

/// Blog posts.
#[derive(Debug, Clone, Copy)]
pub struct Blog;

impl ContentKind for Blog {
    type Metadata = BlogMetadata;
    type Filter = BlogFilter;

    const NAME: &'static str = "blog";

    fn directory(content: &ContentConfig) -> &Path {
        &content.blog
    }

    fn coerce(record: &FrontmatterRecord, slug: &str) -> BlogMetadata {
        BlogMetadata::coerce(record, slug)
    }

    fn id(meta: &BlogMetadata) -> &str {
        &meta.id
    }

    fn title(meta: &BlogMetadata) -> &Localized {
        &meta.title
    }

    fn date(meta: &BlogMetadata) -> &str {
        &meta.published_at
    }

    fn tags(meta: &BlogMetadata) -> &[String] {
        &meta.tags
    }

    fn matches(filter: &BlogFilter, meta: &BlogMetadata) -> bool {
        filter.matches(meta)
    }

    fn default_sort() -> SortOption {
        SortOption::Newest
    }

    fn compare(a: &BlogMetadata, b: &BlogMetadata, sort: SortOption) -> Ordering {
        match sort {
            SortOption::Newest => compare_newest(&a.published_at, &b.published_at),
            SortOption::Oldest => compare_oldest(&a.published_at, &b.published_at),
            SortOption::TitleAsc | SortOption::NameAsc => compare_titles(&a.title.ja, &b.title.ja),
            SortOption::TitleDesc | SortOption::NameDesc => {
                compare_titles(&b.title.ja, &a.title.ja)
            }
            // Ordered posts come first; the rest follow by date.
            SortOption::Order => match (a.order, b.order) {
                (Some(x), Some(y)) => x
                    .cmp(&y)
                    .then_with(|| compare_newest(&a.published_at, &b.published_at)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => compare_newest(&a.published_at, &b.published_at),
            },
        }
    }

    fn related_candidates(_current: &BlogMetadata) -> BlogFilter {
        BlogFilter::published()
    }

    fn relevance(current: &BlogMetadata, candidate: &BlogMetadata) -> usize {
        candidate
            .tags
            .iter()
            .filter(|tag| current.tags.contains(tag))
            .count()
    }
}

// =============================================================================
// Works and projects
// =============================================================================

fn compare_works(a: &WorkMetadata, b: &WorkMetadata, sort: SortOption) -> Ordering {
    match sort {
        SortOption::Newest => compare_newest(&a.start_date, &b.start_date),
        SortOption::Oldest => compare_oldest(&a.start_date, &b.start_date),
        SortOption::TitleAsc | SortOption::NameAsc => compare_titles(&a.title.ja, &b.title.ja),
        SortOption::TitleDesc | SortOption::NameDesc => compare_titles(&b.title.ja, &a.title.ja),
        SortOption::Order => a.order.cmp(&b.order),
    }
}

/// Implements [`ContentKind`] for a kind using [`WorkMetadata`].
///
/// Related works share the current work's category and keep listing order.
macro_rules! work_kind {
    ($(#[$attr:meta])* $kind:ident, $name:literal, $field:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy)]
        pub struct $kind;

        impl ContentKind for $kind {
            type Metadata = WorkMetadata;
            type Filter = WorkFilter;

            const NAME: &'static str = $name;

            fn directory(content: &ContentConfig) -> &Path {
                &content.$field
            }

            fn coerce(record: &FrontmatterRecord, slug: &str) -> WorkMetadata {
                WorkMetadata::coerce(record, slug)
            }

            fn id(meta: &WorkMetadata) -> &str {
                &meta.id
            }

            fn title(meta: &WorkMetadata) -> &Localized {
                &meta.title
            }

            fn date(meta: &WorkMetadata) -> &str {
                &meta.start_date
            }

            fn tags(meta: &WorkMetadata) -> &[String] {
                &meta.technologies
            }

            fn matches(filter: &WorkFilter, meta: &WorkMetadata) -> bool {
                filter.matches(meta)
            }

            fn default_sort() -> SortOption {
                SortOption::Order
            }

            fn compare(a: &WorkMetadata, b: &WorkMetadata, sort: SortOption) -> Ordering {
                compare_works(a, b, sort)
            }

            fn related_candidates(current: &WorkMetadata) -> WorkFilter {
                WorkFilter::category(current.category)
            }

            fn relevance(_current: &WorkMetadata, _candidate: &WorkMetadata) -> usize {
                0
            }
        }

        impl FeaturedKind for $kind {
            fn featured_filter() -> WorkFilter {
                WorkFilter::featured()
            }
        }
    };
}

work_kind!(
    /// Portfolio works.
    Works,
    "works",
    works
);

work_kind!(
    /// Side projects.
    Projects,
    "projects",
    projects
);
