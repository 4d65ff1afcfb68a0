use crate::commands::{Project, record_route};
use crate::content::{Blog, BlogData, ContentKind, ContentRecord, ContentStore, Projects, Works};
use crate::i18n::{Locale, localize_path};
use crate::{KindArg, ShowArgs};

#[derive(thiserror::Error, Debug)]
#[error("no {kind} record with id '{id}'")]
pub struct NotFound {
    pub kind: &'static str,
    pub id: String,
}

pub async fn run(args: &ShowArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;
    let locale = args.locale.unwrap_or(project.config.i18n.default_locale);

    match args.kind {
        KindArg::Blog => {
            let record = find_post(&project.store::<Blog>()?, &args.id).await?;
            print_record(&record, locale, args.json)
        }
        KindArg::Works => {
            let record = find(&project.store::<Works>()?, &args.id).await?;
            print_record(&record, locale, args.json)
        }
        KindArg::Projects => {
            let record = find(&project.store::<Projects>()?, &args.id).await?;
            print_record(&record, locale, args.json)
        }
    }
}

/// Look up a record, turning a miss into [`NotFound`].
pub async fn find<K: ContentKind>(
    store: &ContentStore<K>,
    id: &str,
) -> Result<ContentRecord<K>, anyhow::Error> {
    store.get_by_id(id).await?.ok_or_else(|| {
        NotFound {
            kind: K::NAME,
            id: id.to_string(),
        }
        .into()
    })
}

/// Look up a blog post. Unpublished posts are treated as missing.
pub async fn find_post(
    store: &ContentStore<Blog>,
    id: &str,
) -> Result<BlogData, anyhow::Error> {
    let record = find(store, id).await?;
    if !record.metadata.published {
        tracing::info!(id, "post is not published");
        return Err(NotFound {
            kind: Blog::NAME,
            id: id.to_string(),
        }
        .into());
    }
    Ok(record)
}

fn print_record<K: ContentKind>(
    record: &ContentRecord<K>,
    locale: Locale,
    json: bool,
) -> Result<(), anyhow::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
        return Ok(());
    }

    let meta = &record.metadata;
    println!("{}", K::title(meta).get_or_fallback(locale));
    println!("  id:    {}", record.id());
    println!(
        "  path:  {}",
        localize_path(&record_route::<K>(record.id()), locale)
    );
    let date = K::date(meta);
    if !date.is_empty() {
        println!("  date:  {date}");
    }
    let tags = K::tags(meta);
    if !tags.is_empty() {
        println!("  tags:  {}", tags.join(", "));
    }
    println!();
    println!("{}", record.content);
    Ok(())
}
