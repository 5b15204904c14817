//! Error types for noticias-merge
//!
//! Every variant is fatal to the run it occurs in. Per-record rejections and
//! per-fetch failures are not errors: they are logged and absorbed where they
//! happen.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum MergeError {
    /// Snapshot of the store could not be taken
    #[error("Backup failed for {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store file parsed but is not a JSON array
    #[error("Store {path} must be a JSON array, found {found}")]
    StoreShape { path: PathBuf, found: &'static str },

    /// og:image client could not be set up
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[source] crate::services::FetchError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// noticias-common error (JSON parse, config, batch shape)
    #[error(transparent)]
    Common(#[from] noticias_common::Error),
}

/// Result type for pipeline steps
pub type MergeResult<T> = Result<T, MergeError>;
