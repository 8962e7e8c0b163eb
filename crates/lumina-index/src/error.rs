use lumina_core::embed::EmbedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbedError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
