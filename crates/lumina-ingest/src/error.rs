//! Ingestion error types.

use thiserror::Error;

/// Errors that can occur while ingesting a folder of images.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An HTTP request to the vision-model endpoint failed.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The vision model produced no usable description.
    #[error("description failed for {path}: {message}")]
    Describe { path: String, message: String },

    /// The embedding collaborator failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] lumina_core::embed::EmbedError),

    /// An error propagated from the record store.
    #[error("store error: {0}")]
    Store(#[from] lumina_core::Error),
}

impl IngestError {
    /// Returns `true` when the error concerns a single image and the
    /// pipeline may keep going with the rest of the batch. An
    /// unreadable file or an unusable description only poisons that
    /// one image; collaborator and store failures do not.
    pub fn is_per_image(&self) -> bool {
        matches!(self, Self::Describe { .. } | Self::Io(_))
    }
}

/// Convenience alias for ingestion results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;
