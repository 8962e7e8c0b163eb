use anyhow::Result;

use lumina_core::embed::HashEmbedder;
use lumina_core::JsonStore;
use lumina_index::{SearchDefaults, SearchEngine};
use lumina_ingest::Config;

pub fn run_search(
    query: &str,
    top_k: Option<usize>,
    min_similarity: Option<f32>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let store = JsonStore::new(&config.store_path);
    let records = store.load()?;

    if records.is_empty() {
        println!("The record store is empty. Run `lumina index <folder>` first.");
        return Ok(());
    }

    let defaults = SearchDefaults {
        top_k: config.top_k,
        min_similarity: config.min_similarity,
    };
    let engine = SearchEngine::new(records, defaults);
    let embedder = HashEmbedder::new(config.embedding_dim);

    let hits = engine.search(&embedder, query, top_k, min_similarity)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for hit in &hits {
        println!("[{:.4}] {}", hit.score, hit.path);
        println!("    {}", preview(&hit.description, 100));
    }

    Ok(())
}

/// First `max` characters of a description, with an ellipsis when cut.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_leaves_short_text_alone() {
        assert_eq!(preview("a red car", 100), "a red car");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let long = "x".repeat(150);
        let shown = preview(&long, 100);
        assert_eq!(shown.chars().count(), 103);
        assert!(shown.ends_with("..."));
    }
}
