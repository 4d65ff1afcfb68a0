use crate::commands::show::{find, find_post};
use crate::commands::{Project, print_table};
use crate::content::{Blog, ContentKind, ContentRecord, ContentStore, Projects, Works};
use crate::{KindArg, RelatedArgs};

pub async fn run(args: &RelatedArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;
    let locale = project.config.i18n.default_locale;

    match args.kind {
        KindArg::Blog => {
            let store = project.store::<Blog>()?;
            let current = find_post(&store, &args.id).await?;
            print_table(&related(&store, &current, args.limit).await?, locale);
        }
        KindArg::Works => {
            let store = project.store::<Works>()?;
            let current = find(&store, &args.id).await?;
            print_table(&related(&store, &current, args.limit).await?, locale);
        }
        KindArg::Projects => {
            let store = project.store::<Projects>()?;
            let current = find(&store, &args.id).await?;
            print_table(&related(&store, &current, args.limit).await?, locale);
        }
    }
    Ok(())
}

async fn related<K: ContentKind>(
    store: &ContentStore<K>,
    current: &ContentRecord<K>,
    limit: usize,
) -> Result<Vec<ContentRecord<K>>, anyhow::Error> {
    let related = store.related(&current.metadata, limit).await?;
    if related.is_empty() {
        tracing::info!(kind = K::NAME, id = current.id(), "no related records");
    }
    Ok(related)
}
