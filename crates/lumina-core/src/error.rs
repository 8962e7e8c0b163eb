use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed store {path}: {reason}")]
    MalformedStore { path: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
