//! Backup Archiver
//!
//! Copies the store verbatim to `<backup_dir>/source-<YYYY-MM-DD-HH-MM-SS>.json`
//! before anything mutates it. Snapshots are never pruned. Two runs within the
//! same second write the same name and the later one wins.

use crate::error::{MergeError, MergeResult};
use chrono::{DateTime, Local};
use noticias_common::time;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Snapshot file name prefix
const SNAPSHOT_PREFIX: &str = "source-";

/// Backup Archiver
#[derive(Debug, Clone)]
pub struct BackupArchiver {
    backup_dir: PathBuf,
}

impl BackupArchiver {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Snapshot path for a given instant
    pub fn snapshot_path(&self, at: &DateTime<Local>) -> PathBuf {
        self.backup_dir.join(format!(
            "{}{}.json",
            SNAPSHOT_PREFIX,
            time::snapshot_timestamp(at)
        ))
    }

    /// Snapshot the store now
    pub fn archive(&self, store_path: &Path) -> MergeResult<PathBuf> {
        self.archive_at(store_path, &time::now())
    }

    /// Snapshot the store under the name for `at`
    ///
    /// Creates the backup directory (and parents) when missing.
    pub fn archive_at(&self, store_path: &Path, at: &DateTime<Local>) -> MergeResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|source| MergeError::Backup {
            path: self.backup_dir.clone(),
            source,
        })?;

        let target = self.snapshot_path(at);
        let bytes = fs::copy(store_path, &target).map_err(|source| MergeError::Backup {
            path: store_path.to_path_buf(),
            source,
        })?;

        info!(
            store = %store_path.display(),
            snapshot = %target.display(),
            bytes,
            "Store backup created"
        );
        Ok(target)
    }
}
