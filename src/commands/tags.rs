use crate::TagsArgs;
use crate::commands::Project;
use crate::content::Blog;
use crate::gradient::tag_color;

pub async fn run(args: &TagsArgs) -> Result<(), anyhow::Error> {
    let project = Project::load(&args.config).await?;
    let store = project.store::<Blog>()?;

    for tag in store.all_tags().await? {
        match tag_color(&tag) {
            Some(color) => println!("{tag}  {color}"),
            None => println!("{tag}"),
        }
    }
    Ok(())
}
