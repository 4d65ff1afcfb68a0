//! The content pipeline.
//!
//! raw markdown -> frontmatter extraction -> HTML rendering -> metadata
//! coercion -> [`ContentRecord`] -> filter/sort -> caller

mod document;
mod frontmatter;
mod kind;
mod markdown;
mod metadata;
mod query;
mod store;

pub use document::{ContentRecord, SourceDocument};
pub use kind::{Blog, ContentKind, FeaturedKind, Projects, Works};
pub use markdown::{MarkdownError, MarkdownOptions};
pub use metadata::{BlogMetadata, Category, Status};
pub use query::{BlogFilter, SortOption, WorkFilter};
pub use store::{ContentStore, DEFAULT_RELATED_LIMIT};

/// Blog post record.
pub type BlogData = ContentRecord<Blog>;
