//! `folio export`: write the data behind every page as JSON.
//!
//! Output layout, relative to `site.output`:
//!
//! ```text
//! blog/index.json        published posts, newest first
//! blog/<slug>.json       one post with its related posts
//! works/index.json       every work in default order
//! works/featured.json    featured works
//! works/<slug>.json      one work with its related works
//! projects/...           same as works
//! tags.json              every tag used by a published post
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ExportArgs;
use crate::commands::{Project, Summary, write_json};
use crate::config::{ConfigError, ReloadPolicy};
use crate::content::{
    Blog, BlogFilter, BlogMetadata, ContentKind, ContentRecord, ContentStore, DEFAULT_RELATED_LIMIT,
    FeaturedKind, Projects, WorkFilter, Works,
};
use crate::gradient::tag_color;

/// Route data for one detail page.
#[derive(Serialize)]
#[serde(bound(serialize = ""))]
struct DetailPage<'a, K: ContentKind> {
    record: &'a ContentRecord<K>,
    summary: Summary<'a, K>,
    related: Vec<Summary<'a, K>>,
}

#[derive(Serialize)]
struct TagEntry<'a> {
    name: &'a str,
    color: Option<&'static str>,
}

#[derive(Debug, Default)]
struct ExportReport {
    files: usize,
    skipped: usize,
}

pub async fn run(args: &ExportArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;
    let output_dir = project.output_dir();
    let mut report = ExportReport::default();

    let blog = snapshot_store::<Blog>(&project)?;
    if present(&blog).await {
        export_collection(
            &blog,
            &output_dir,
            &BlogFilter::published(),
            |meta: &BlogMetadata| meta.published,
            &mut report,
        )
        .await?;

        let tags = blog.all_tags().await?;
        let entries: Vec<TagEntry<'_>> = tags
            .iter()
            .map(|name| TagEntry {
                name,
                color: tag_color(name),
            })
            .collect();
        write_json(&output_dir.join("tags.json"), &entries).await?;
        report.files += 1;
    }

    export_works(&snapshot_store::<Works>(&project)?, &output_dir, &mut report).await?;
    export_works(&snapshot_store::<Projects>(&project)?, &output_dir, &mut report).await?;

    println!(
        "Exported route data to {} ({} files, {} skipped)",
        output_dir.display(),
        report.files,
        report.skipped
    );

    Ok(())
}

/// A store that parses its documents once for the whole export, whatever
/// the configured reload policy.
fn snapshot_store<K: ContentKind>(project: &Project) -> Result<ContentStore<K>, ConfigError> {
    Ok(project.store::<K>()?.with_policy(ReloadPolicy::Manual))
}

/// Whether a store has a directory to read; a missing one is skipped.
async fn present<K: ContentKind>(store: &ContentStore<K>) -> bool {
    let exists = tokio::fs::metadata(store.dir())
        .await
        .is_ok_and(|metadata| metadata.is_dir());
    if !exists {
        tracing::warn!(
            kind = K::NAME,
            dir = %store.dir().display(),
            "content directory not found; skipping"
        );
    }
    exists
}

fn data_file(output_dir: &Path, kind: &str, name: &str) -> PathBuf {
    output_dir.join(kind).join(format!("{name}.json"))
}

async fn export_works<K: FeaturedKind<Filter = WorkFilter>>(
    store: &ContentStore<K>,
    output_dir: &Path,
    report: &mut ExportReport,
) -> Result<(), anyhow::Error> {
    if !present(store).await {
        return Ok(());
    }

    export_collection(store, output_dir, &WorkFilter::default(), |_| true, report).await?;

    let featured = store.featured(None).await?;
    let summaries: Vec<Summary<'_, K>> = featured.iter().map(Summary::new).collect();
    write_json(&data_file(output_dir, K::NAME, "featured"), &summaries).await?;
    report.files += 1;

    Ok(())
}

/// Write the index and every detail page of one collection.
///
/// Detail pages are looked up by slug, the way page routes are; a slug that
/// matches no record id, or a record `visible` rejects, gets no page.
async fn export_collection<K: ContentKind>(
    store: &ContentStore<K>,
    output_dir: &Path,
    index_filter: &K::Filter,
    visible: impl Fn(&K::Metadata) -> bool,
    report: &mut ExportReport,
) -> Result<(), anyhow::Error> {
    // Later queries share this snapshot.
    let loaded = store.reload().await?;
    tracing::debug!(kind = K::NAME, loaded, "loaded collection");

    let listed = store.list(Some(index_filter), None).await?;
    let summaries: Vec<Summary<'_, K>> = listed.iter().map(Summary::new).collect();
    write_json(&data_file(output_dir, K::NAME, "index"), &summaries).await?;
    report.files += 1;

    for slug in store.all_slugs().await? {
        let Some(record) = store.get_by_id(&slug).await? else {
            tracing::info!(kind = K::NAME, %slug, "slug does not match a record id; skipping");
            report.skipped += 1;
            continue;
        };
        if !visible(&record.metadata) {
            tracing::info!(kind = K::NAME, %slug, "record is not public; skipping");
            report.skipped += 1;
            continue;
        }

        let related = store
            .related(&record.metadata, DEFAULT_RELATED_LIMIT)
            .await?;
        let page = DetailPage {
            record: &record,
            summary: Summary::new(&record),
            related: related.iter().map(Summary::new).collect(),
        };
        write_json(&data_file(output_dir, K::NAME, &slug), &page).await?;
        report.files += 1;
    }

    tracing::info!(kind = K::NAME, count = listed.len(), "exported collection");
    Ok(())
}
