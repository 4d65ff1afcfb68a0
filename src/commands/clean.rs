use crate::CleanArgs;
use crate::commands::Project;

pub async fn run(args: &CleanArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;

    // Delete the exported route data
    let output_dir = project.output_dir();
    if output_dir.exists() {
        if args.dry_run {
            println!("Would delete {}", output_dir.display());
        } else {
            tokio::fs::remove_dir_all(&output_dir).await?;
            println!("Deleted {}", output_dir.display());
        }
    } else {
        tracing::info!(dir = %output_dir.display(), "nothing to clean");
    }

    Ok(())
}
