use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::content::{Category, SortOption, Status};
use crate::i18n::Locale;

mod commands;
mod config;
mod content;
mod gradient;
mod i18n;

#[derive(Parser)]
#[command(name = "folio", version, about = "Content pipeline for a bilingual portfolio and blog")]
struct Args {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true, default_value = "false")]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: FolioCommand,
}

/// Which content collection a command works on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Blog,
    Works,
    Projects,
}

#[derive(Parser)]
struct ConfigArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "folio.yaml")]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct ListArgs {
    /// The collection to list
    kind: KindArg,

    /// Only blog posts with this tag
    #[arg(long)]
    tag: Option<String>,

    /// Only published blog posts
    #[arg(long, default_value = "false")]
    published: bool,

    /// Only works in this category
    #[arg(long)]
    category: Option<Category>,

    /// Only works with this status
    #[arg(long)]
    status: Option<Status>,

    /// Leave out works that are still in progress
    #[arg(long, default_value = "false")]
    exclude_in_progress: bool,

    /// Only featured works
    #[arg(long, default_value = "false")]
    featured: bool,

    /// Only works using this technology
    #[arg(long)]
    technology: Option<String>,

    /// Sort order; defaults to newest for blog posts and order for works
    #[arg(short, long)]
    sort: Option<SortOption>,

    /// Show at most this many records
    #[arg(short, long)]
    limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct ShowArgs {
    /// The collection to look in
    kind: KindArg,

    /// The record id
    id: String,

    /// Locale for titles and descriptions; defaults to the configured locale
    #[arg(long)]
    locale: Option<Locale>,

    /// Print JSON instead of text
    #[arg(long, default_value = "false")]
    json: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct SlugsArgs {
    /// The collection to enumerate
    kind: KindArg,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct TagsArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct RelatedArgs {
    /// The collection to look in
    kind: KindArg,

    /// The id of the current record
    id: String,

    /// How many related records to show
    #[arg(short, long, default_value_t = content::DEFAULT_RELATED_LIMIT)]
    limit: usize,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct LocaleArgs {
    /// A previously stored preference
    #[arg(long)]
    stored: Option<String>,

    /// The `lang` URL parameter
    #[arg(long)]
    param: Option<String>,

    /// Browser languages in preference order
    #[arg(long = "lang")]
    languages: Vec<String>,

    /// Also print this path localized for the detected locale
    #[arg(long)]
    path: Option<String>,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Parser)]
struct CleanArgs {
    /// Only print what would be deleted
    #[arg(long, default_value = "false")]
    dry_run: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum FolioCommand {
    /// Initialize a new folio project
    Init(InitArgs),

    /// List blog posts, works or projects
    List(ListArgs),

    /// Show one record
    Show(ShowArgs),

    /// Print every slug in a collection
    Slugs(SlugsArgs),

    /// Print every tag used by published blog posts
    Tags(TagsArgs),

    /// Show records related to one record
    Related(RelatedArgs),

    /// Detect a visitor's locale
    Locale(LocaleArgs),

    /// Export route data as JSON into the output directory
    Export(ExportArgs),

    /// Delete the output directory
    Clean(CleanArgs),
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "info,folio=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        FolioCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        FolioCommand::List(args) => {
            commands::list::run(&args).await?;
        }
        FolioCommand::Show(args) => {
            commands::show::run(&args).await?;
        }
        FolioCommand::Slugs(args) => {
            commands::slugs::run(&args).await?;
        }
        FolioCommand::Tags(args) => {
            commands::tags::run(&args).await?;
        }
        FolioCommand::Related(args) => {
            commands::related::run(&args).await?;
        }
        FolioCommand::Locale(args) => {
            commands::locale::run(&args);
        }
        FolioCommand::Export(args) => {
            commands::export::run(&args).await?;
        }
        FolioCommand::Clean(args) => {
            commands::clean::run(&args).await?;
        }
    }

    Ok(())
}
