//! Merge Engine
//!
//! Orchestrates one merge run as a linear state machine:
//!
//! ```text
//! Start → BackedUp → Enriched → Read → Validated → Merged → Reset → Done
//!   └──────────┴──────────┴────────┴──────┴───────────┴────────┴──→ Aborted
//! ```
//!
//! The store write and the batch reset are the only mutations of the two data
//! files, and both happen after validation. An abort before the store write
//! leaves the store untouched and the batch as the enricher persisted it.

use super::backup_archiver::BackupArchiver;
use super::duplicate_filter::filter_duplicates;
use super::metadata_enricher::{Enrichment, EnrichmentSummary, MetadataEnricher, SkipReason};
use super::og_image_client::ImageFetcher;
use super::record_validator::validate_records;
use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};
use noticias_common::json_file::{read_json, write_json};
use noticias_common::record::json_kind;
use noticias_common::{IncomingBatch, Record};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Pipeline states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    Start,
    BackedUp,
    Enriched,
    Read,
    Validated,
    Merged,
    Reset,
    Done,
    Aborted,
}

/// Summary of a completed merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeReport {
    /// Snapshot taken before the store was touched
    pub backup_path: PathBuf,
    pub enrichment: EnrichmentSummary,
    /// Valid store records before the append
    pub store_before: usize,
    /// Records appended from the batch
    pub appended: usize,
    pub store_after: usize,
    /// Invalid entries dropped from the store
    pub rejected_store: usize,
    /// Invalid entries dropped from the batch
    pub rejected_batch: usize,
    /// Batch records dropped by the duplicate policy
    pub duplicates_skipped: usize,
}

/// How a run ended, short of an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Store extended and batch reset
    Merged(MergeReport),
    /// Enrichment precondition failed; nothing merged
    Skipped(SkipReason),
    /// No valid incoming record survived validation; nothing merged
    NothingToMerge { rejected: usize },
}

/// Merge Engine
pub struct MergeEngine {
    config: MergeConfig,
    archiver: BackupArchiver,
    enricher: MetadataEnricher,
}

impl MergeEngine {
    pub fn new(config: MergeConfig, fetcher: Arc<dyn ImageFetcher>) -> Self {
        let archiver = BackupArchiver::new(config.backup_dir.clone());
        let enricher = MetadataEnricher::new(fetcher, config.fallback_image_url.clone());
        Self {
            config,
            archiver,
            enricher,
        }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Run the full pipeline once
    ///
    /// # Errors
    /// Backup failure, malformed JSON in either file, a store that is not an
    /// array, or any filesystem error. The state the run aborted from is logged.
    pub async fn run(&self) -> MergeResult<MergeOutcome> {
        let mut state = MergeState::Start;
        let result = self.run_pipeline(&mut state).await;

        match &result {
            Ok(MergeOutcome::Merged(_)) => {}
            Ok(outcome) => {
                debug!(from = ?state, ?outcome, "Merge stopped without changes");
                advance(&mut state, MergeState::Aborted);
            }
            Err(e) => {
                error!(from = ?state, error = %e, "Merge aborted");
                advance(&mut state, MergeState::Aborted);
            }
        }
        result
    }

    /// Run only the enrichment step
    pub async fn enrich_only(&self) -> MergeResult<Enrichment> {
        self.enricher.enrich_batch(&self.config.batch_path).await
    }

    async fn run_pipeline(&self, state: &mut MergeState) -> MergeResult<MergeOutcome> {
        let store_path = &self.config.store_path;
        let batch_path = &self.config.batch_path;

        let backup_path = self.archiver.archive(store_path)?;
        advance(state, MergeState::BackedUp);

        let enrichment = match self.enricher.enrich_batch(batch_path).await? {
            Enrichment::Enriched(summary) => summary,
            Enrichment::Skipped(reason) => {
                info!(reason = %reason, "Merge stopped: nothing to enrich");
                return Ok(MergeOutcome::Skipped(reason));
            }
        };
        advance(state, MergeState::Enriched);

        let store_candidates = match read_json(store_path)? {
            Value::Array(values) => values,
            other => {
                return Err(MergeError::StoreShape {
                    path: store_path.clone(),
                    found: json_kind(&other),
                })
            }
        };
        let batch = IncomingBatch::from_value(read_json(batch_path)?)?;
        advance(state, MergeState::Read);

        let store = validate_records(store_candidates, "store");
        let incoming = validate_records(batch.into_candidates(), "batch");
        let (incoming_records, duplicates_skipped) =
            filter_duplicates(self.config.duplicate_policy, &store.valid, incoming.valid);
        advance(state, MergeState::Validated);

        if incoming_records.is_empty() {
            info!(
                batch = %batch_path.display(),
                rejected = incoming.rejected,
                duplicates = duplicates_skipped,
                "Merge stopped: no valid incoming records"
            );
            return Ok(MergeOutcome::NothingToMerge {
                rejected: incoming.rejected + duplicates_skipped,
            });
        }

        let store_before = store.valid.len();
        let appended = incoming_records.len();
        let merged: Vec<Record> = store.valid.into_iter().chain(incoming_records).collect();
        write_json(store_path, &merged)?;
        advance(state, MergeState::Merged);

        write_json(batch_path, &IncomingBatch::empty_placeholder())?;
        advance(state, MergeState::Reset);

        let report = MergeReport {
            backup_path,
            enrichment,
            store_before,
            appended,
            store_after: merged.len(),
            rejected_store: store.rejected,
            rejected_batch: incoming.rejected,
            duplicates_skipped,
        };
        info!(
            store = %store_path.display(),
            batch = %batch_path.display(),
            appended = report.appended,
            total = report.store_after,
            "Merge completed"
        );
        advance(state, MergeState::Done);

        Ok(MergeOutcome::Merged(report))
    }
}

fn advance(state: &mut MergeState, next: MergeState) {
    debug!(from = ?state, to = ?next, "Merge state transition");
    *state = next;
}
