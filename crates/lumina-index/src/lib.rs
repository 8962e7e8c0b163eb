//! In-memory vector search for lumina.
//!
//! Builds a dense embedding matrix from a record-store snapshot, ranks
//! records against a query embedding by cosine similarity, and maps
//! ranked rows back to their originating records. The index is rebuilt
//! whenever a [`SearchEngine`] is constructed; there is no incremental
//! maintenance and no persistence.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod error;
pub mod indexer;
pub mod matrix;

pub use engine::{SearchDefaults, SearchEngine, SearchHit};
pub use error::{Result, SearchError};
pub use indexer::VectorIndexer;
pub use matrix::EmbeddingMatrix;
