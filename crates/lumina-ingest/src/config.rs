use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for lumina.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (LUMINA_* prefix)
/// 3. Config file (~/.config/lumina/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON record store.
    ///
    /// Can be set via:
    /// - CLI: --store /path/to/store.json
    /// - ENV: LUMINA_STORE_PATH
    /// - Config: store_path = "/path/to/store.json"
    /// - Default: ~/.local/share/lumina/image_store.json
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Embedding dimension D. Must match what the embedding
    /// collaborator produces.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Maximum number of search results per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Lowest similarity score a search result may carry.
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    /// File extensions (without the dot) treated as images.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// OpenAI-compatible chat-completions endpoint of the vision
    /// model. When unset, ingestion cannot describe new images.
    ///
    /// Can be set via:
    /// - ENV: LUMINA_VLM_ENDPOINT
    /// - Config: vlm_endpoint = "http://localhost:8080/v1/chat/completions"
    pub vlm_endpoint: Option<String>,

    /// Model name sent to the vision endpoint.
    #[serde(default = "default_vlm_model")]
    pub vlm_model: String,

    /// Bearer token for the vision endpoint, when it requires one.
    pub vlm_api_key: Option<String>,

    /// Token budget for each generated description.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            embedding_dim: default_embedding_dim(),
            top_k: default_top_k(),
            min_similarity: default_min_similarity(),
            allowed_extensions: default_allowed_extensions(),
            vlm_endpoint: None,
            vlm_model: default_vlm_model(),
            vlm_api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/lumina/config.toml
    /// Reads environment variables with LUMINA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("lumina");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration with a custom store path.
    ///
    /// This is used when the --store CLI flag is provided.
    pub fn load_with_store_path(store_path: PathBuf) -> Result<Self> {
        let mut config = Self::load()?;
        config.store_path = store_path;
        Ok(config)
    }

    /// Reject values no component downstream can work with.
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.embedding_dim > 0, "embedding_dim must be positive");
        anyhow::ensure!(self.top_k > 0, "top_k must be positive");
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.min_similarity),
            "min_similarity must be within [0, 1], got {}",
            self.min_similarity
        );
        Ok(())
    }
}

/// Get the default record store path.
///
/// Returns: ~/.local/share/lumina/image_store.json (or platform equivalent)
fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumina")
        .join("image_store.json")
}

fn default_embedding_dim() -> usize {
    384
}

fn default_top_k() -> usize {
    5
}

fn default_min_similarity() -> f32 {
    0.3
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
}

fn default_vlm_model() -> String {
    "qwen3-vl-4b-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    200
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/lumina/config.toml
/// - macOS: ~/Library/Application Support/lumina/config.toml
/// - Windows: %APPDATA%\lumina\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lumina")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Lumina Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (LUMINA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the JSON record store
#
# Can also be set via:
# - CLI: lumina --store /custom/store.json search "a red car"
# - Environment: LUMINA_STORE_PATH=/custom/store.json
#
# Default: Platform-specific data directory
#store_path = "/path/to/image_store.json"

# Embedding dimension; must match the embedding collaborator
#embedding_dim = 384

# Search defaults
#top_k = 5
#min_similarity = 0.3

# File extensions (without the dot) treated as images
#allowed_extensions = ["jpg", "jpeg", "png"]

# OpenAI-compatible chat-completions endpoint of the vision model.
# Ingestion needs this; search does not.
#
# Can also be set via:
# - Environment: LUMINA_VLM_ENDPOINT=http://localhost:8080/v1/chat/completions
#vlm_endpoint = "http://localhost:8080/v1/chat/completions"
#vlm_model = "qwen3-vl-4b-instruct"
#vlm_api_key = "your-api-key-here"
#max_tokens = 200
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}
