//! Embedding collaborator seam.
//!
//! The search engine and the ingest pipeline only ever talk to an
//! [`Embedder`]. Implementations must return unit-length vectors of a
//! fixed dimension; the indexer scores by plain dot product and does
//! not re-normalize, so a non-unit vector silently turns cosine
//! similarity into a scaled inner product.

use thiserror::Error;

/// Errors from an embedding collaborator.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("cannot embed empty text")]
    EmptyText,

    #[error("embedding dimension must be positive")]
    ZeroDimension,

    #[error("embedding model error: {0}")]
    Model(String),
}

/// Produces semantic embeddings of text.
pub trait Embedder: Send + Sync {
    /// The fixed dimension of every vector this embedder produces.
    fn dimension(&self) -> usize;

    /// Embed one text into a unit-length vector.
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Embed many texts; output order matches input order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

/// Scale a vector to unit length. A zero vector is left unchanged.
pub fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        log::warn!("attempted to normalize a zero vector");
        return;
    }
    for value in vector.iter_mut() {
        *value /= norm;
    }
}

/// Deterministic feature-hashing embedder.
///
/// Buckets FNV-1a hashes of lowercased alphanumeric tokens into a
/// fixed-dimension vector and L2-normalizes the result. No model
/// download, no I/O, fully reproducible; the offline default behind
/// the [`Embedder`] seam. ML-backed embedders plug in the same way.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if self.dimension == 0 {
            return Err(EmbedError::ZeroDimension);
        }
        if text.trim().is_empty() {
            return Err(EmbedError::EmptyText);
        }

        let mut vector = vec![0.0f32; self.dimension];
        let mut tokens = 0usize;
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
        {
            let bucket = fnv1a(token.to_lowercase().as_bytes()) as usize % self.dimension;
            vector[bucket] += 1.0;
            tokens += 1;
        }

        // Punctuation-only text hashes to nothing; an all-zero vector
        // cannot satisfy the unit-length contract.
        if tokens == 0 {
            return Err(EmbedError::EmptyText);
        }

        l2_normalize(&mut vector);
        Ok(vector)
    }
}

/// 64-bit FNV-1a hash.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embeddings_are_unit_length() {
        let embedder = HashEmbedder::new(64);
        let vector = embedder.embed("a red car parked on a quiet street").unwrap();
        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
        assert_eq!(vector.len(), 64);
    }

    #[test]
    fn test_embedding_is_deterministic() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("a blue sky over the sea").unwrap();
        let b = embedder.embed("a blue sky over the sea").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed("A Red Car!").unwrap();
        let b = embedder.embed("a red car").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let embedder = HashEmbedder::new(64);
        assert!(matches!(embedder.embed("   "), Err(EmbedError::EmptyText)));
    }

    #[test]
    fn test_tokenless_text_is_rejected() {
        let embedder = HashEmbedder::new(64);
        assert!(matches!(
            embedder.embed("!!! ???"),
            Err(EmbedError::EmptyText)
        ));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let embedder = HashEmbedder::new(0);
        assert!(matches!(
            embedder.embed("a red car"),
            Err(EmbedError::ZeroDimension)
        ));
    }

    #[test]
    fn test_batch_preserves_order() {
        let embedder = HashEmbedder::new(32);
        let texts = vec!["first text".to_string(), "second text".to_string()];
        let batch = embedder.embed_batch(&texts).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0], embedder.embed("first text").unwrap());
        assert_eq!(batch[1], embedder.embed("second text").unwrap());
    }

    #[test]
    fn test_normalize_leaves_zero_vector_alone() {
        let mut zero = vec![0.0f32; 4];
        l2_normalize(&mut zero);
        assert_eq!(zero, vec![0.0f32; 4]);
    }
}
