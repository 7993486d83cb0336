//! Notion sync CLI application.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use notion_sync::PageSynchronizer;
use shared::{AnnictWork, Config, LogConfig};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sync Annict works into a Notion database", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a page for an Annict work, enriched with Jikan pictures
    Create {
        /// Annict work JSON file, or `-` for stdin
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Update an existing page from an Annict work
    Edit {
        /// Notion page ID
        #[arg(short, long)]
        page_id: String,

        /// Annict work JSON file, or `-` for stdin
        #[arg(short, long)]
        record: PathBuf,
    },

    /// Print the properties a work maps to, without calling any API
    Map {
        /// Annict work JSON file, or `-` for stdin
        #[arg(short, long)]
        record: PathBuf,

        /// Gallery image URLs
        #[arg(long, num_args = 1..)]
        images: Vec<String>,
    },
}

fn read_work(path: &Path) -> Result<AnnictWork> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read record from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read record file: {}", path.display()))?
    };

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse Annict work record: {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration; `map` calls no API and tolerates a broken file
    let mut config = if matches!(args.command, Command::Map { .. }) {
        Config::load_or_default(&args.config)
    } else {
        Config::from_file(&args.config)
            .with_context(|| format!("Failed to load config from {}", args.config.display()))?
    };
    config.apply_env();

    // Initialize logging
    shared::logging::init(LogConfig::from_settings(
        "notion-sync",
        &config.logging,
        args.verbose,
    )?)?;

    info!(config_file = %args.config.display(), "Loaded configuration");

    match args.command {
        Command::Map { record, images } => {
            let work = read_work(&record)?;
            let mapper = notion_sync::PropertyMapper::new(config.status_labels.clone());
            let properties = mapper.map(&work, &images);
            println!("{}", serde_json::to_string_pretty(&properties)?);
        }
        Command::Create { record } => {
            config.validate()?;
            let work = read_work(&record)?;
            let sync = PageSynchronizer::new(&config).context("Failed to create synchronizer")?;

            let page = sync.create_page(&work).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Edit { page_id, record } => {
            config.validate()?;
            let work = read_work(&record)?;
            let sync = PageSynchronizer::new(&config).context("Failed to create synchronizer")?;

            let response = sync.edit_page(&page_id, &work).await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                bail!("Notion update failed with status {}: {}", status, body);
            }
            info!(page_id = %page_id, status = %status, "Updated Notion page");
        }
    }

    Ok(())
}
