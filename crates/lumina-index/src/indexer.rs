//! Brute-force cosine-similarity ranking over a dense matrix.

use std::cmp::Ordering;

/// Ranks a query vector against a fixed set of row vectors.
///
/// Scores are plain dot products: with unit-length inputs (the
/// caller's contract, see [`lumina_core::embed::Embedder`]) that is
/// cosine similarity. The indexer never re-normalizes and never
/// mutates; any change to the underlying records requires building a
/// new indexer.
#[derive(Debug)]
pub struct VectorIndexer {
    rows: Vec<Vec<f32>>,
}

impl VectorIndexer {
    /// Build an indexer over `rows`. All rows must share one dimension;
    /// the embedding matrix builder enforces that, not the indexer.
    #[must_use]
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    /// Number of indexed rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Return up to `top_k` `(row_index, score)` pairs, sorted by
    /// descending score with ties broken by ascending row index. When
    /// the matrix holds fewer than `top_k` rows, all rows are ranked.
    #[must_use]
    pub fn query(&self, query_vector: &[f32], top_k: usize) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(row, vector)| (row, dot(query_vector, vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scored.truncate(top_k);
        scored
    }
}

/// Dot product; mismatched lengths score 0.0.
fn dot(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_similarity_is_maximal() {
        let indexer = VectorIndexer::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let results = indexer.query(&[1.0, 0.0], 2);
        assert_eq!(results[0], (0, 1.0));
        assert_eq!(results[1], (1, 0.0));
    }

    #[test]
    fn test_results_sorted_descending() {
        let indexer = VectorIndexer::new(vec![
            vec![0.0, 1.0],
            vec![0.6, 0.8],
            vec![1.0, 0.0],
        ]);
        let results = indexer.query(&[1.0, 0.0], 3);
        let scores: Vec<f32> = results.iter().map(|(_, s)| *s).collect();
        assert_eq!(scores, vec![1.0, 0.6, 0.0]);
    }

    #[test]
    fn test_ties_break_by_ascending_row_index() {
        let indexer = VectorIndexer::new(vec![
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
        ]);
        let results = indexer.query(&[1.0, 0.0], 3);
        assert_eq!(results[0].0, 1);
        assert_eq!(results[1].0, 2);
        assert_eq!(results[2].0, 0);
    }

    #[test]
    fn test_top_k_truncates() {
        let indexer = VectorIndexer::new(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.6, 0.8],
        ]);
        assert_eq!(indexer.query(&[1.0, 0.0], 2).len(), 2);
    }

    #[test]
    fn test_fewer_rows_than_top_k_returns_all() {
        let indexer = VectorIndexer::new(vec![vec![1.0, 0.0]]);
        assert_eq!(indexer.query(&[1.0, 0.0], 10).len(), 1);
    }

    #[test]
    fn test_len_and_is_empty_track_rows() {
        let empty = VectorIndexer::new(Vec::new());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let indexer = VectorIndexer::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert!(!indexer.is_empty());
        assert_eq!(indexer.len(), 2);
    }

    #[test]
    fn test_mismatched_query_dimension_scores_zero() {
        let indexer = VectorIndexer::new(vec![vec![1.0, 0.0]]);
        let results = indexer.query(&[1.0, 0.0, 0.0], 1);
        assert_eq!(results[0].1, 0.0);
    }
}
