use crate::commands::{Project, Summary, print_table};
use crate::content::{Blog, BlogFilter, ContentKind, ContentStore, Projects, WorkFilter, Works};
use crate::{KindArg, ListArgs};

pub async fn run(args: &ListArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;

    match args.kind {
        KindArg::Blog => {
            warn_ignored(args, &work_flags(args));
            list(&project.store::<Blog>()?, &blog_filter(args), args, &project).await
        }
        KindArg::Works => {
            warn_ignored(args, &blog_flags(args));
            list(&project.store::<Works>()?, &work_filter(args), args, &project).await
        }
        KindArg::Projects => {
            warn_ignored(args, &blog_flags(args));
            list(&project.store::<Projects>()?, &work_filter(args), args, &project).await
        }
    }
}

async fn list<K: ContentKind>(
    store: &ContentStore<K>,
    filter: &K::Filter,
    args: &ListArgs,
    project: &Project,
) -> Result<(), anyhow::Error> {
    let mut records = store.list(Some(filter), args.sort).await?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    if args.json {
        let summaries: Vec<Summary<'_, K>> = records.iter().map(Summary::new).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_table(&records, project.config.i18n.default_locale);
    }
    Ok(())
}

fn blog_filter(args: &ListArgs) -> BlogFilter {
    BlogFilter {
        published_only: args.published,
        tag: args.tag.clone(),
    }
}

fn work_filter(args: &ListArgs) -> WorkFilter {
    WorkFilter {
        category: args.category,
        status: args.status,
        exclude_in_progress: args.exclude_in_progress,
        featured_only: args.featured,
        technology: args.technology.clone(),
    }
}

fn blog_flags(args: &ListArgs) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if args.tag.is_some() {
        flags.push("--tag");
    }
    if args.published {
        flags.push("--published");
    }
    flags
}

fn work_flags(args: &ListArgs) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if args.category.is_some() {
        flags.push("--category");
    }
    if args.status.is_some() {
        flags.push("--status");
    }
    if args.exclude_in_progress {
        flags.push("--exclude-in-progress");
    }
    if args.featured {
        flags.push("--featured");
    }
    if args.technology.is_some() {
        flags.push("--technology");
    }
    flags
}

fn warn_ignored(args: &ListArgs, flags: &[&str]) {
    for flag in flags {
        tracing::warn!(kind = ?args.kind, flag, "filter does not apply to this kind; ignoring");
    }
}
