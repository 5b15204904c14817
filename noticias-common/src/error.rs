//! Common error types for the noticias tools

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for noticias operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the noticias crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON file could not be parsed or serialized
    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// File content has an unexpected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Wrap a serde_json error with the file it came from
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.into(),
            source,
        }
    }
}
