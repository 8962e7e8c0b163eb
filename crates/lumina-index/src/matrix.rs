//! Dense embedding matrix derived from a store snapshot.

use lumina_core::ImageRecord;

/// The embeddings of a store snapshot, stacked into rows, plus the
/// mapping from each row back to its index in the snapshot.
///
/// Records without a usable embedding are skipped, so row indices and
/// store indices diverge; `store_indices[row]` recovers the original
/// position. Rows whose dimension disagrees with the first usable
/// embedding are skipped too, which keeps the matrix rectangular.
#[derive(Debug)]
pub struct EmbeddingMatrix {
    rows: Vec<Vec<f32>>,
    store_indices: Vec<usize>,
}

impl EmbeddingMatrix {
    /// Stack the usable embeddings of `records` into a matrix.
    #[must_use]
    pub fn build(records: &[ImageRecord]) -> Self {
        let mut rows = Vec::new();
        let mut store_indices = Vec::new();
        let mut dimension: Option<usize> = None;

        for (index, record) in records.iter().enumerate() {
            if record.embedding.is_empty() {
                continue;
            }

            match dimension {
                None => dimension = Some(record.embedding.len()),
                Some(expected) if record.embedding.len() != expected => {
                    log::warn!(
                        "skipping {}: embedding dimension {} does not match {}",
                        record.path,
                        record.embedding.len(),
                        expected
                    );
                    continue;
                }
                Some(_) => {}
            }

            rows.push(record.embedding.clone());
            store_indices.push(index);
        }

        Self { rows, store_indices }
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map a matrix row back to its index in the store snapshot.
    #[must_use]
    pub fn store_index(&self, row: usize) -> Option<usize> {
        self.store_indices.get(row).copied()
    }

    /// Consume the matrix, yielding the rows and the row-to-store map.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<f32>>, Vec<usize>) {
        (self.rows, self.store_indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_records_without_embeddings() {
        let records = vec![
            ImageRecord::new("/photos/a.jpg", "a red car", vec![1.0, 0.0]),
            ImageRecord::new("/photos/b.jpg", "pending", vec![]),
            ImageRecord::new("/photos/c.jpg", "a blue sky", vec![0.0, 1.0]),
        ];

        let matrix = EmbeddingMatrix::build(&records);
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix.store_index(0), Some(0));
        assert_eq!(matrix.store_index(1), Some(2));
    }

    #[test]
    fn test_skips_mismatched_dimensions() {
        let records = vec![
            ImageRecord::new("/photos/a.jpg", "a red car", vec![1.0, 0.0]),
            ImageRecord::new("/photos/b.jpg", "odd one out", vec![1.0, 0.0, 0.0]),
        ];

        let matrix = EmbeddingMatrix::build(&records);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.store_index(0), Some(0));
    }

    #[test]
    fn test_empty_input_builds_empty_matrix() {
        let matrix = EmbeddingMatrix::build(&[]);
        assert!(matrix.is_empty());
        assert_eq!(matrix.store_index(0), None);
    }
}
