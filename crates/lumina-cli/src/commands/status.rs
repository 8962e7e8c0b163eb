use anyhow::Result;

use lumina_core::JsonStore;
use lumina_ingest::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let store = JsonStore::new(&config.store_path);
    let records = store.load()?;

    let valid = records.iter().filter(|record| record.is_valid()).count();
    let incomplete = records.len() - valid;

    println!("\n📊 Lumina Status\n");
    println!("  Store: {}", config.store_path.display());
    println!("  Records: {}", records.len());
    println!("  Searchable: {}", valid);

    if incomplete > 0 {
        println!("  Incomplete: {} (will be reprocessed on the next index run)", incomplete);
    }

    if records.is_empty() {
        println!("\n  Run `lumina index <folder>` to index images");
    }

    Ok(())
}
