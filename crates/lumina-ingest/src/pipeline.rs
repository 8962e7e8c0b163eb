//! The ingest stage: scan → dedup → describe → embed → append.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use treadle::{Stage, StageContext, StageOutcome, Workflow};

use lumina_core::embed::Embedder;
use lumina_core::{ImageRecord, JsonStore};

use crate::describe::Describer;
use crate::error::IngestResult;
use crate::filter::filter_existing;
use crate::scan::scan_image_folder;

/// Counts reported by one ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Images found in the folder.
    pub discovered: usize,
    /// Images skipped because the store already holds a valid record.
    pub already_indexed: usize,
    /// Images skipped because description failed or came back empty.
    pub skipped: usize,
    /// Records appended to the store.
    pub appended: usize,
}

/// The Ingest stage: walk the folder, drop already-indexed images,
/// describe and embed the rest, append the new records.
pub struct IngestStage {
    folder: PathBuf,
    store: JsonStore,
    allowed_extensions: Vec<String>,
    describer: Arc<dyn Describer>,
    embedder: Arc<dyn Embedder>,
}

impl fmt::Debug for IngestStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestStage")
            .field("folder", &self.folder)
            .field("store", &self.store)
            .field("allowed_extensions", &self.allowed_extensions)
            .finish_non_exhaustive()
    }
}

impl IngestStage {
    #[must_use]
    pub fn new(
        folder: PathBuf,
        store: JsonStore,
        allowed_extensions: Vec<String>,
        describer: Arc<dyn Describer>,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            folder,
            store,
            allowed_extensions,
            describer,
            embedder,
        }
    }

    /// Run one ingest pass over the folder.
    ///
    /// Failures tied to a single image (an unreadable file, an
    /// unusable description) are logged and skipped; the rest of the
    /// batch keeps going. Collaborator and store failures abort the
    /// pass.
    pub async fn ingest_folder(&self) -> IngestResult<IngestSummary> {
        let candidates = scan_image_folder(&self.folder, &self.allowed_extensions)?;
        let mut summary = IngestSummary {
            discovered: candidates.len(),
            ..IngestSummary::default()
        };

        if candidates.is_empty() {
            log::info!("no images found in {}", self.folder.display());
            return Ok(summary);
        }

        // Dedup against the store before any model work.
        let existing = self.store.load()?;
        let pending = filter_existing(&candidates, &existing);
        summary.already_indexed = candidates.len() - pending.len();

        let mut described_paths = Vec::new();
        let mut descriptions = Vec::new();
        for path in &pending {
            match self.describer.describe(Path::new(path)).await {
                Ok(description) => {
                    described_paths.push(path.clone());
                    descriptions.push(description);
                }
                Err(err) if err.is_per_image() => {
                    log::warn!("skipping {path}: {err}");
                    summary.skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        if descriptions.is_empty() {
            log::info!("nothing new to index in {}", self.folder.display());
            return Ok(summary);
        }

        // One batch per run; output order matches input order.
        let embeddings = self.embedder.embed_batch(&descriptions)?;

        let records: Vec<ImageRecord> = described_paths
            .into_iter()
            .zip(descriptions)
            .zip(embeddings)
            .map(|((path, description), embedding)| ImageRecord::new(path, description, embedding))
            .collect();

        summary.appended = records.len();
        self.store.append(records)?;

        Ok(summary)
    }
}

#[async_trait::async_trait]
impl Stage for IngestStage {
    fn name(&self) -> &str {
        "ingest"
    }

    async fn execute(
        &self,
        _item: &dyn treadle::WorkItem,
        _context: &mut StageContext,
    ) -> treadle::Result<StageOutcome> {
        log::info!("starting ingest of {}", self.folder.display());

        match self.ingest_folder().await {
            Ok(summary) => {
                log::info!(
                    "ingest complete: {} discovered, {} already indexed, {} appended, {} skipped",
                    summary.discovered,
                    summary.already_indexed,
                    summary.appended,
                    summary.skipped
                );
                Ok(StageOutcome::Complete)
            }
            Err(e) => Err(treadle::TreadleError::StageExecution(format!(
                "ingest failed: {e}"
            ))),
        }
    }
}

/// Build the ingest pipeline.
///
/// # Errors
/// Returns an error if the workflow cannot be built.
pub fn build_pipeline(
    folder: PathBuf,
    store: JsonStore,
    allowed_extensions: Vec<String>,
    describer: Arc<dyn Describer>,
    embedder: Arc<dyn Embedder>,
) -> treadle::Result<Workflow> {
    let ingest_stage = IngestStage::new(folder, store, allowed_extensions, describer, embedder);

    Workflow::builder().stage("ingest", ingest_stage).build()
}
