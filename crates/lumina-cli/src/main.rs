use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use lumina_ingest::Config;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lumina", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the record store (default: ~/.local/share/lumina/image_store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Index a folder of images
    ///
    /// Recursively walks the specified folder for images (jpg/jpeg/png by
    /// default), then for each image not already present in the record store:
    ///
    /// - Asks the configured vision model for a natural-language description
    /// - Embeds the description into a unit-length semantic vector
    /// - Appends the resulting record to the JSON store
    ///
    /// Indexing is incremental: images that already have a valid record are
    /// skipped, and images whose record is incomplete (for example after an
    /// interrupted run) are reprocessed. Images the vision model cannot
    /// describe are skipped with a warning and picked up on the next run.
    ///
    /// Requires `vlm_endpoint` to be configured (see `lumina config`).
    Index {
        /// Path to the image folder
        path: PathBuf,
    },
    /// Search indexed images with a free-text query
    Search {
        /// The query text
        query: String,

        /// Maximum number of results (default from config)
        #[arg(long)]
        top_k: Option<usize>,

        /// Lowest similarity score to keep (default from config)
        #[arg(long)]
        min_similarity: Option<f32>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show record store status
    Status,
    /// Show or initialize the configuration
    Config {
        /// Create the config file with defaults if it doesn't exist
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match cli.store {
        Some(path) => Config::load_with_store_path(path)?,
        None => Config::load()?,
    };

    // Ensure the store directory exists
    if let Some(parent) = config.store_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match cli.command {
        Commands::Index { path } => {
            commands::run_index(path, &config).await?;
        }
        Commands::Search {
            query,
            top_k,
            min_similarity,
            json,
        } => {
            commands::run_search(&query, top_k, min_similarity, json, &config)?;
        }
        Commands::Status => {
            commands::show_status(&config)?;
        }
        Commands::Config { init } => {
            commands::run_config(init)?;
        }
    }

    Ok(())
}
