use crate::{
    InitArgs,
    config::{
        Config, ContentConfig, DEFAULT_CONFIG_FILE, I18nConfig, MarkdownConfig, SiteConfig,
        StoreConfig,
    },
};

pub async fn run(args: &InitArgs) -> Result<(), anyhow::Error> {
    let path = if args.path.is_relative() {
        std::env::current_dir()?.join(&args.path)
    } else {
        args.path.clone()
    };

    if !path.exists() {
        if args.create {
            tokio::fs::create_dir_all(&path).await?;
            println!("Created directory {path}", path = path.display());
        } else {
            return Err(anyhow::anyhow!(
                "Directory does not exist: {path}",
                path = path.display()
            ));
        }
    }

    let config_file = path.join(DEFAULT_CONFIG_FILE);
    if config_file.exists() {
        return Err(anyhow::anyhow!(
            "Config file already exists: {config_file}",
            config_file = config_file.display()
        ));
    }

    let default_config = default_config();

    println!("Initializing project in {}", path.display());

    let config_text = serde_yaml::to_string(&default_config)?;
    tokio::fs::write(&config_file, config_text).await?;

    println!(
        "Created config file {config_file}",
        config_file = config_file.display()
    );

    let content = &default_config.content;
    for dir in [&content.blog, &content.works, &content.projects] {
        let dir = path.join(dir);
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "created content directory");
    }

    Ok(())
}

fn default_config() -> Config {
    Config {
        site: SiteConfig {
            name: "My Portfolio".into(),
            url: Some("https://example.com".into()),
            output: "_site".into(),
        },
        content: ContentConfig::default(),
        markdown: MarkdownConfig::default(),
        i18n: I18nConfig::default(),
        store: StoreConfig::default(),
    }
}
