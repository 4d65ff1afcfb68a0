use crate::commands::Project;
use crate::content::{Blog, ContentKind, ContentStore, Projects, Works};
use crate::{KindArg, SlugsArgs};

pub async fn run(args: &SlugsArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;

    match args.kind {
        KindArg::Blog => print_slugs(&project.store::<Blog>()?).await,
        KindArg::Works => print_slugs(&project.store::<Works>()?).await,
        KindArg::Projects => print_slugs(&project.store::<Projects>()?).await,
    }
}

async fn print_slugs<K: ContentKind>(store: &ContentStore<K>) -> Result<(), anyhow::Error> {
    for slug in store.all_slugs().await? {
        println!("{slug}");
    }
    Ok(())
}
