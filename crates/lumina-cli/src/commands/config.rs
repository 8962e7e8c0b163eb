use anyhow::Result;

use lumina_ingest::{config, Config};

/// Show the effective configuration, or create the config file with
/// `--init`.
pub fn run_config(init: bool) -> Result<()> {
    if init {
        let created = config::ensure_config_file()?;
        let config_path = config::config_file_path();

        if created {
            println!("✓ Created config file: {}", config_path.display());
            println!("\nEdit this file to configure lumina.");
        } else {
            println!("Config file already exists: {}", config_path.display());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let config_path = config::config_file_path();

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() {
            "yes"
        } else {
            "no (using defaults)"
        }
    );

    println!("Settings:");
    println!("  store_path: {}", config.store_path.display());
    println!("  embedding_dim: {}", config.embedding_dim);
    println!("  top_k: {}", config.top_k);
    println!("  min_similarity: {}", config.min_similarity);
    println!("  allowed_extensions: {:?}", config.allowed_extensions);
    println!(
        "  vlm_endpoint: {}",
        config.vlm_endpoint.as_deref().unwrap_or("<not set>")
    );
    println!("  vlm_model: {}", config.vlm_model);
    println!(
        "  vlm_api_key: {}",
        if config.vlm_api_key.is_some() {
            "<set>"
        } else {
            "<not set>"
        }
    );
    println!("  max_tokens: {}", config.max_tokens);

    println!("\nPriority: CLI args > ENV vars (LUMINA_*) > Config file > Defaults");

    Ok(())
}
