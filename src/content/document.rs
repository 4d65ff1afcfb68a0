use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::kind::ContentKind;
use super::markdown::{MarkdownOptions, render_markdown};

// =============================================================================
// Source documents
// =============================================================================

/// One markdown source file, read but not yet parsed.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// File name without the `.md` extension
    pub slug: String,
    /// Where the document was read from
    pub path: PathBuf,
    /// The full file text, frontmatter included
    pub raw: String,
}

impl SourceDocument {
    pub fn new(slug: impl Into<String>, path: impl Into<PathBuf>, raw: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            path: path.into(),
            raw: raw.into(),
        }
    }

    /// Run the document through the pipeline:
    /// frontmatter extraction, markdown rendering, metadata coercion.
    pub fn parse<K: ContentKind>(&self, options: &MarkdownOptions) -> ContentRecord<K> {
        let output = render_markdown(&self.raw, options);
        if output.front_matter.is_empty() {
            tracing::debug!(
                kind = K::NAME,
                path = %self.path.display(),
                "document has no frontmatter; using defaults"
            );
        } else {
            tracing::trace!(
                kind = K::NAME,
                slug = %self.slug,
                fields = output.front_matter.len(),
                "parsed frontmatter"
            );
        }

        ContentRecord {
            slug: self.slug.clone(),
            metadata: K::coerce(&output.front_matter, &self.slug),
            content: output.html,
        }
    }
}

/// Returns true if `path` names a markdown source file.
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Derive a slug from a file path.
/// "content/blog/hello-world.md" -> "hello-world"
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

// =============================================================================
// Parsed records
// =============================================================================

/// A parsed document: typed metadata plus rendered HTML.
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
pub struct ContentRecord<K: ContentKind> {
    /// Slug of the source file
    pub slug: String,
    pub metadata: K::Metadata,
    /// The document body as HTML
    pub content: String,
}

impl<K: ContentKind> ContentRecord<K> {
    pub fn id(&self) -> &str {
        K::id(&self.metadata)
    }
}

impl<K: ContentKind> Clone for ContentRecord<K> {
    fn clone(&self) -> Self {
        Self {
            slug: self.slug.clone(),
            metadata: self.metadata.clone(),
            content: self.content.clone(),
        }
    }
}

impl<K: ContentKind> fmt::Debug for ContentRecord<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentRecord")
            .field("kind", &K::NAME)
            .field("slug", &self.slug)
            .field("metadata", &self.metadata)
            .field("content", &self.content)
            .finish()
    }
}
