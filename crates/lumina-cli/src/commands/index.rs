use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use lumina_core::embed::HashEmbedder;
use lumina_core::JsonStore;
use lumina_ingest::{build_pipeline, Config, HttpDescriber, IngestJob};

pub async fn run_index(folder: PathBuf, config: &Config) -> Result<()> {
    tracing::info!("Starting index of {}", folder.display());

    let Some(endpoint) = &config.vlm_endpoint else {
        anyhow::bail!(
            "No vision endpoint configured.\n\n\
             Set `vlm_endpoint` in {} (or LUMINA_VLM_ENDPOINT) to an \
             OpenAI-compatible chat-completions URL.",
            lumina_ingest::config::config_file_path().display()
        );
    };

    let describer = HttpDescriber::new(
        endpoint,
        &config.vlm_model,
        config.vlm_api_key.clone(),
        config.max_tokens,
    )?;
    let embedder = HashEmbedder::new(config.embedding_dim);
    let store = JsonStore::new(&config.store_path);

    // Build the pipeline (just the ingest stage)
    let workflow = build_pipeline(
        folder.clone(),
        store,
        config.allowed_extensions.clone(),
        Arc::new(describer),
        Arc::new(embedder),
    )?;

    // Create a state store for the pipeline
    let state_path = config
        .store_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pipeline.db");
    let mut state = treadle::SqliteStateStore::open(&state_path).await?;

    // Create a work item for the index job
    let index_job = IngestJob::new("index-job", folder);

    // Subscribe to events for progress display
    let mut events = workflow.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                treadle::WorkflowEvent::StageStarted { stage, .. } => {
                    println!("  ⏳ [{stage}] Starting...");
                }
                treadle::WorkflowEvent::StageCompleted { stage, .. } => {
                    println!("  ✓ [{stage}] Complete");
                }
                treadle::WorkflowEvent::StageFailed { stage, error, .. } => {
                    eprintln!("  ✗ [{stage}] FAILED: {error}");
                }
                _ => {}
            }
        }
    });

    // Execute the workflow
    workflow.advance(&index_job, &mut state).await?;

    println!("\n✓ Index complete");
    Ok(())
}
