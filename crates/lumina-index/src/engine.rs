//! Query orchestration: embed, rank, filter, assemble.

use serde::Serialize;

use lumina_core::embed::Embedder;
use lumina_core::ImageRecord;

use crate::error::{Result, SearchError};
use crate::indexer::VectorIndexer;
use crate::matrix::EmbeddingMatrix;

/// Fallback values used when a caller passes `None` to
/// [`SearchEngine::search`]. Usually sourced from configuration.
#[derive(Debug, Clone, Copy)]
pub struct SearchDefaults {
    /// Maximum number of results per query.
    pub top_k: usize,
    /// Lowest score a result may carry; a score equal to the bound is
    /// retained.
    pub min_similarity: f32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            top_k: 5,
            min_similarity: 0.3,
        }
    }
}

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub score: f32,
    pub path: String,
    pub filename: String,
    pub description: String,
}

/// Ranks a record-store snapshot against free-text queries.
///
/// The engine owns the snapshot it was built from. Records lacking a
/// usable embedding stay in the snapshot but are excluded from
/// ranking. Any change to the store requires constructing a new
/// engine; the matrix is not maintained incrementally.
#[derive(Debug)]
pub struct SearchEngine {
    records: Vec<ImageRecord>,
    store_indices: Vec<usize>,
    indexer: Option<VectorIndexer>,
    defaults: SearchDefaults,
}

impl SearchEngine {
    /// Build an engine over a snapshot of the record store.
    #[must_use]
    pub fn new(records: Vec<ImageRecord>, defaults: SearchDefaults) -> Self {
        let matrix = EmbeddingMatrix::build(&records);
        let (rows, store_indices) = matrix.into_parts();

        let indexer = VectorIndexer::new(rows);
        let indexer = if indexer.is_empty() {
            log::warn!("no usable embeddings in the store; searches will return nothing");
            None
        } else {
            log::info!("search engine ready with {} vectors", indexer.len());
            Some(indexer)
        };

        Self {
            records,
            store_indices,
            indexer,
            defaults,
        }
    }

    /// Records in the snapshot this engine was built from.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Records that made it into the index.
    #[must_use]
    pub fn indexed_count(&self) -> usize {
        self.store_indices.len()
    }

    /// Rank stored records against `query`.
    ///
    /// `top_k` and `min_similarity` fall back to the engine's
    /// [`SearchDefaults`] when `None`. An empty store (or one with no
    /// usable embeddings) yields `Ok(vec![])`; an empty query or a
    /// failed query embedding is an error, so callers can tell "no
    /// data" from "the query never ran".
    pub fn search(
        &self,
        embedder: &dyn Embedder,
        query: &str,
        top_k: Option<usize>,
        min_similarity: Option<f32>,
    ) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let query_vector = embedder.embed(query)?;

        let Some(indexer) = &self.indexer else {
            return Ok(Vec::new());
        };

        let top_k = top_k.unwrap_or(self.defaults.top_k);
        let min_similarity = min_similarity.unwrap_or(self.defaults.min_similarity);

        // The indexer's order (descending score, stable ties) is the
        // final order; threshold filtering must not re-sort.
        let mut hits = Vec::new();
        for (row, score) in indexer.query(&query_vector, top_k) {
            if score < min_similarity {
                continue;
            }

            let record = &self.records[self.store_indices[row]];
            hits.push(SearchHit {
                score,
                path: record.path.clone(),
                filename: record.filename.clone(),
                description: record.description.clone(),
            });
        }

        Ok(hits)
    }
}
