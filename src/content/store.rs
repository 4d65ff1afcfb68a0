//! Content stores: enumerate, parse and query one kind of content.
//!
//! A store reads every `*.md` file directly inside its directory. What it
//! keeps between queries depends on its [`ReloadPolicy`]:
//!
//! - `Always`: nothing. Every query re-reads and re-parses all documents.
//! - `Manual`: the first query loads a snapshot that later queries share
//!   until [`ContentStore::reload`] or [`ContentStore::invalidate`] is called.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::try_join_all;
use tokio::sync::RwLock;

use super::document::{ContentRecord, SourceDocument, is_markdown, slug_from_path};
use super::kind::{Blog, ContentKind, FeaturedKind};
use super::markdown::MarkdownOptions;
use super::query::SortOption;
use crate::config::{Config, ConfigError, ReloadPolicy, resolve_path};

/// Number of related records returned when the caller does not say.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("content directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read directory entry in {path}: {source}")]
    ReadEntry {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read document {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        source: std::io::Error,
    },
}

type Snapshot<K> = Arc<Vec<ContentRecord<K>>>;

/// Queryable collection of one kind of content.
pub struct ContentStore<K: ContentKind> {
    dir: PathBuf,
    markdown: MarkdownOptions,
    policy: ReloadPolicy,
    snapshot: RwLock<Option<Snapshot<K>>>,
}

impl<K: ContentKind> ContentStore<K> {
    pub fn new(dir: impl Into<PathBuf>, markdown: MarkdownOptions, policy: ReloadPolicy) -> Self {
        Self {
            dir: dir.into(),
            markdown,
            policy,
            snapshot: RwLock::new(None),
        }
    }

    /// Create the store for this kind from site configuration.
    ///
    /// Relative content directories are resolved against `base_path`.
    pub fn from_config(config: &Config, base_path: &Path) -> Result<Self, ConfigError> {
        let markdown = MarkdownOptions::from_config(&config.markdown)?;
        let dir = resolve_path(K::directory(&config.content), base_path);
        Ok(Self::new(dir, markdown, config.store.reload))
    }

    /// Use `policy` instead of the configured reload policy.
    pub fn with_policy(mut self, policy: ReloadPolicy) -> Self {
        self.policy = policy;
        self.snapshot = RwLock::new(None);
        self
    }

    /// The directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Find all markdown files, sorted by file name.
    async fn discover(&self) -> Result<Vec<(String, PathBuf)>, StoreError> {
        let metadata = match tokio::fs::metadata(&self.dir).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::DirectoryNotFound(self.dir.clone()));
            }
            Err(source) => {
                return Err(StoreError::ReadDir {
                    path: self.dir.clone(),
                    source,
                });
            }
        };
        if !metadata.is_dir() {
            return Err(StoreError::NotADirectory(self.dir.clone()));
        }

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|source| StoreError::ReadDir {
                path: self.dir.clone(),
                source,
            })?;

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| StoreError::ReadEntry {
                path: self.dir.clone(),
                source,
            })?
        {
            let path = entry.path();
            if !is_markdown(&path) {
                continue;
            }
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| StoreError::ReadEntry {
                    path: path.clone(),
                    source,
                })?;
            if !file_type.is_file() {
                continue;
            }
            match slug_from_path(&path) {
                Some(slug) => files.push((slug, path)),
                None => tracing::warn!(path = %path.display(), "skipping file without a usable name"),
            }
        }

        files.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(files)
    }

    /// Read and parse every document. Documents are processed concurrently;
    /// the result keeps enumeration order.
    async fn load_all(&self) -> Result<Vec<ContentRecord<K>>, StoreError> {
        let files = self.discover().await?;
        let markdown = &self.markdown;

        let records = try_join_all(files.into_iter().map(|(slug, path)| async move {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| StoreError::ReadDocument {
                    path: path.clone(),
                    source,
                })?;
            Ok::<_, StoreError>(SourceDocument::new(slug, path, raw).parse::<K>(markdown))
        }))
        .await?;

        tracing::debug!(
            kind = K::NAME,
            dir = %self.dir.display(),
            count = records.len(),
            "loaded documents"
        );
        Ok(records)
    }

    /// Get the current records according to the reload policy.
    async fn records(&self) -> Result<Snapshot<K>, StoreError> {
        match self.policy {
            ReloadPolicy::Always => Ok(Arc::new(self.load_all().await?)),
            ReloadPolicy::Manual => {
                if let Some(snapshot) = self.snapshot.read().await.as_ref() {
                    return Ok(Arc::clone(snapshot));
                }

                let mut slot = self.snapshot.write().await;
                // Another query may have loaded it while we waited.
                if let Some(snapshot) = slot.as_ref() {
                    return Ok(Arc::clone(snapshot));
                }
                let snapshot = Arc::new(self.load_all().await?);
                *slot = Some(Arc::clone(&snapshot));
                Ok(snapshot)
            }
        }
    }

    /// Re-read all documents now, replacing any snapshot.
    ///
    /// Returns the number of documents loaded.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        self.invalidate().await;
        Ok(self.records().await?.len())
    }

    /// Drop any snapshot; the next query reloads.
    pub async fn invalidate(&self) {
        self.snapshot.write().await.take();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// List records, filtered and sorted.
    ///
    /// Without a sort option the kind's default ordering is used. The sort
    /// is stable, so ties keep file-name order.
    pub async fn list(
        &self,
        filter: Option<&K::Filter>,
        sort: Option<SortOption>,
    ) -> Result<Vec<ContentRecord<K>>, StoreError> {
        let records = self.records().await?;
        let mut listed: Vec<ContentRecord<K>> = records
            .iter()
            .filter(|record| filter.is_none_or(|f| K::matches(f, &record.metadata)))
            .cloned()
            .collect();

        let sort = sort.unwrap_or_else(K::default_sort);
        listed.sort_by(|a, b| K::compare(&a.metadata, &b.metadata, sort));
        Ok(listed)
    }

    /// Look up a record by its metadata id.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<ContentRecord<K>>, StoreError> {
        let records = self.records().await?;
        let found = records.iter().find(|record| record.id() == id).cloned();
        if found.is_none() {
            tracing::info!(kind = K::NAME, id, "no record with this id");
        }
        Ok(found)
    }

    /// Records related to `current`, best match first, never including
    /// `current` itself.
    pub async fn related(
        &self,
        current: &K::Metadata,
        limit: usize,
    ) -> Result<Vec<ContentRecord<K>>, StoreError> {
        let candidates = self
            .list(Some(&K::related_candidates(current)), None)
            .await?;
        let current_id = K::id(current);

        let mut scored: Vec<(usize, ContentRecord<K>)> = candidates
            .into_iter()
            .filter(|record| record.id() != current_id)
            .map(|record| (K::relevance(current, &record.metadata), record))
            .collect();
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));

        Ok(scored
            .into_iter()
            .take(limit)
            .map(|(_, record)| record)
            .collect())
    }

    /// Slugs of every source document, in file-name order.
    pub async fn all_slugs(&self) -> Result<Vec<String>, StoreError> {
        let slugs: Vec<String> = self
            .discover()
            .await?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect();
        tracing::debug!(kind = K::NAME, count = slugs.len(), "enumerated slugs");
        Ok(slugs)
    }
}

impl<K: FeaturedKind> ContentStore<K> {
    /// Featured records in default order, optionally truncated.
    pub async fn featured(&self, limit: Option<usize>) -> Result<Vec<ContentRecord<K>>, StoreError> {
        let mut featured = self.list(Some(&K::featured_filter()), None).await?;
        if let Some(limit) = limit {
            featured.truncate(limit);
        }
        Ok(featured)
    }
}

impl ContentStore<Blog> {
    /// Every tag used by a published post, sorted and de-duplicated.
    pub async fn all_tags(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records().await?;
        let tags: BTreeSet<&str> = records
            .iter()
            .filter(|record| record.metadata.published)
            .flat_map(|record| record.metadata.tags.iter().map(String::as_str))
            .collect();
        Ok(tags.into_iter().map(str::to_string).collect())
    }
}
