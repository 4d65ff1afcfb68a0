pub mod clean;
pub mod export;
pub mod init;
pub mod list;
pub mod locale;
pub mod related;
pub mod show;
pub mod slugs;
pub mod tags;

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::ConfigArgs;
use crate::config::{Config, ConfigError, absolute_config_path, base_path_from_config, resolve_path};
use crate::content::{ContentKind, ContentRecord, ContentStore};
use crate::gradient::CardStyle;
use crate::i18n::{Locale, Localized, localize_path};

/// A loaded config and the directory its relative paths resolve against.
pub struct Project {
    pub config: Config,
    pub base_path: PathBuf,
}

impl Project {
    pub async fn load(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let config_path = absolute_config_path(args.config_file.as_deref())?;
        let config = Config::load_from_arg(Some(&config_path)).await?;
        let base_path = base_path_from_config(&config_path);
        Ok(Self { config, base_path })
    }

    pub fn store<K: ContentKind>(&self) -> Result<ContentStore<K>, ConfigError> {
        ContentStore::from_config(&self.config, &self.base_path)
    }

    pub fn output_dir(&self) -> PathBuf {
        resolve_path(&self.config.site.output, &self.base_path)
    }
}

/// The page route of a record, e.g. `/blog/intro`.
pub fn record_route<K: ContentKind>(id: &str) -> String {
    format!("/{}/{}", K::NAME, id)
}

/// A record as it appears in listings: metadata plus card artwork and the
/// page path in each locale. The body is left out.
#[derive(Serialize)]
#[serde(rename_all = "camelCase", bound(serialize = ""))]
pub struct Summary<'a, K: ContentKind> {
    pub slug: &'a str,
    pub paths: Localized,
    pub card: CardStyle,
    #[serde(flatten)]
    pub metadata: &'a K::Metadata,
}

impl<'a, K: ContentKind> Summary<'a, K> {
    pub fn new(record: &'a ContentRecord<K>) -> Self {
        let meta = &record.metadata;
        let id = record.id();
        let route = record_route::<K>(id);
        let title = K::title(meta).get_or_fallback(Locale::BASE);

        Self {
            slug: &record.slug,
            paths: Localized::new(
                localize_path(&route, Locale::Ja),
                localize_path(&route, Locale::En),
            ),
            card: CardStyle::new(K::tags(meta), id, title),
            metadata: meta,
        }
    }
}

/// Print one line per record: id, date and title.
pub fn print_table<K: ContentKind>(records: &[ContentRecord<K>], locale: Locale) {
    let id_width = records
        .iter()
        .map(|record| record.id().chars().count())
        .max()
        .unwrap_or(0);

    for record in records {
        let meta = &record.metadata;
        let date = K::date(meta);
        println!(
            "{id:<id_width$}  {date:<10}  {title}",
            id = record.id(),
            date = if date.is_empty() { "-" } else { date },
            title = K::title(meta).get_or_fallback(locale),
        );
    }
}

/// Write `value` as pretty JSON, creating parent directories.
pub async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let json = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, json).await?;
    tracing::debug!(path = %path.display(), "wrote route data");
    Ok(())
}
