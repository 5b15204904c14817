//! Error types for noticias-site

use std::path::PathBuf;
use thiserror::Error;

/// Site generation error type
#[derive(Debug, Error)]
pub enum SiteError {
    /// Store file parsed but is not a JSON array
    #[error("Store {path} must be a JSON array, found {found}")]
    StoreShape { path: PathBuf, found: &'static str },

    /// A generated file could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Page front matter could not be serialized
    #[error("Front matter for {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// sitemap.xml could not be rendered
    #[error("Sitemap rendering failed: {0}")]
    Xml(#[from] quick_xml::Error),

    /// noticias-common error (JSON parse, config)
    #[error(transparent)]
    Common(#[from] noticias_common::Error),
}

/// Result type for site generation
pub type SiteResult<T> = Result<T, SiteError>;
