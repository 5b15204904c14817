//! Writing generated files

use crate::error::{SiteError, SiteResult};
use noticias_common::json_file::write_atomic;
use noticias_common::Error;
use std::fs;
use std::path::Path;

/// Atomically write a generated file, creating its parent directory
pub fn write_file(path: &Path, bytes: &[u8]) -> SiteResult<()> {
    let wrap = |source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    write_atomic(path, bytes).map_err(|e| match e {
        Error::Io(source) => wrap(source),
        other => other.into(),
    })
}
