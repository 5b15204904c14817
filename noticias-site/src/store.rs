//! Read-only access to the article store

use crate::error::{SiteError, SiteResult};
use noticias_common::json_file::read_json;
use noticias_common::record::json_kind;
use noticias_common::Record;
use serde_json::Value;
use std::path::Path;
use tracing::{info, warn};

/// Load the valid articles of the store
///
/// A missing or empty store yields no articles (logged, not an error).
/// Entries without a usable `titular` are skipped with a warning.
pub fn load_records(path: &Path) -> SiteResult<Vec<Record>> {
    if !path.exists() {
        warn!("No article data at {}, nothing to generate", path.display());
        return Ok(Vec::new());
    }

    let entries = match read_json(path)? {
        Value::Array(entries) => entries,
        other => {
            return Err(SiteError::StoreShape {
                path: path.to_path_buf(),
                found: json_kind(&other),
            })
        }
    };

    if entries.is_empty() {
        warn!("Store {} holds no articles, nothing to generate", path.display());
        return Ok(Vec::new());
    }
    info!("Found {} articles in {}", entries.len(), path.display());

    let records = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match Record::try_from_value(entry) {
            Ok(record) => Some(record),
            Err((reason, _)) => {
                warn!(index, reason = %reason, "Skipping article without usable title");
                None
            }
        })
        .collect();

    Ok(records)
}
