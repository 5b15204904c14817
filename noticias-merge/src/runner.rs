//! Sub-task dispatch
//!
//! The og:image client is built only for the tasks that fetch; `backup`
//! never touches the network.

use crate::cli::Task;
use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use crate::services::{BackupArchiver, Enrichment, FetchError, ImageFetcher, MergeEngine, MergeOutcome};
use std::path::PathBuf;
use std::sync::Arc;

/// Result of one sub-task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    BackedUp(PathBuf),
    Enrichment(Enrichment),
    Merge(MergeOutcome),
}

/// Run `task` with `config`
///
/// `make_fetcher` is called at most once, and only for `extract-og-image`
/// and `merge`.
pub async fn run_task<F>(task: Task, config: MergeConfig, make_fetcher: F) -> MergeResult<TaskOutcome>
where
    F: FnOnce(&MergeConfig) -> Result<Arc<dyn ImageFetcher>, FetchError>,
{
    match task {
        Task::Backup => {
            let archiver = BackupArchiver::new(config.backup_dir.clone());
            Ok(TaskOutcome::BackedUp(archiver.archive(&config.store_path)?))
        }
        Task::ExtractOgImage => {
            let engine = build_engine(config, make_fetcher)?;
            Ok(TaskOutcome::Enrichment(engine.enrich_only().await?))
        }
        Task::Merge => {
            let engine = build_engine(config, make_fetcher)?;
            Ok(TaskOutcome::Merge(engine.run().await?))
        }
    }
}

fn build_engine<F>(config: MergeConfig, make_fetcher: F) -> MergeResult<MergeEngine>
where
    F: FnOnce(&MergeConfig) -> Result<Arc<dyn ImageFetcher>, FetchError>,
{
    let fetcher = make_fetcher(&config).map_err(MergeError::HttpClient)?;
    Ok(MergeEngine::new(config, fetcher))
}
