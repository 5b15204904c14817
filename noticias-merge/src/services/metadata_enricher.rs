//! Metadata Enricher
//!
//! Fills `url_imagen` on the incoming articles from the og:image of their
//! canonical page, and persists the result into the batch file before the
//! merge continues, so a re-run after a crash does not fetch again.
//!
//! **Rules:**
//! - Only articles the validator would keep are considered; the rest are
//!   dropped later anyway.
//! - An empty batch, or a valid article without `url_canonical`, stops the
//!   run before any fetch (a skip, not an error).
//! - Articles that already carry a non-blank `url_imagen` are left alone.
//! - One fetch attempt per article, no retry. A failed fetch writes the
//!   configured fallback URL instead, so `url_imagen` is never left unset.

use super::og_image_client::ImageFetcher;
use crate::error::MergeResult;
use noticias_common::json_file::{read_json, write_json};
use noticias_common::record::{candidate_canonical_url, candidate_image_url, fields};
use noticias_common::{IncomingBatch, Record};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Why enrichment stopped the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Batch file holds no articles (e.g. the `{}` placeholder)
    EmptyBatch,
    /// A valid article has no canonical URL to fetch
    MissingCanonicalUrl { title: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyBatch => write!(f, "incoming batch is empty"),
            SkipReason::MissingCanonicalUrl { title } => {
                write!(f, "article '{}' has no {}", title, fields::CANONICAL_URL)
            }
        }
    }
}

/// Counts of what happened to each article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichmentSummary {
    /// Image taken from the page's og:image
    pub fetched: usize,
    /// Fetch failed, fallback URL written
    pub fallback: usize,
    /// Article already had an image
    pub already_present: usize,
}

impl EnrichmentSummary {
    fn changed_batch(&self) -> bool {
        self.fetched + self.fallback > 0
    }
}

/// Enrichment result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Enrichment {
    Enriched(EnrichmentSummary),
    Skipped(SkipReason),
}

/// Metadata Enricher
pub struct MetadataEnricher {
    fetcher: Arc<dyn ImageFetcher>,
    fallback_image_url: String,
}

impl MetadataEnricher {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, fallback_image_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            fallback_image_url: fallback_image_url.into(),
        }
    }

    /// Enrich the batch file in place
    ///
    /// # Errors
    /// Read, parse and write failures of the batch file. Fetch failures are
    /// never errors.
    pub async fn enrich_batch(&self, batch_path: &Path) -> MergeResult<Enrichment> {
        let mut batch = IncomingBatch::from_value(read_json(batch_path)?)?;

        if let Some(reason) = precondition_failure(&batch) {
            info!(
                batch = %batch_path.display(),
                reason = %reason,
                "Enrichment stopped"
            );
            return Ok(Enrichment::Skipped(reason));
        }

        let mut summary = EnrichmentSummary::default();

        for candidate in batch.candidates_mut() {
            if Record::check(candidate).is_err() {
                continue;
            }
            if candidate_image_url(candidate).is_some() {
                summary.already_present += 1;
                continue;
            }
            let Some(url) = candidate_canonical_url(candidate).map(str::to_owned) else {
                continue;
            };

            let image = match self.fetcher.fetch_representative_image(&url).await {
                Ok(image) => {
                    info!(url = %url, image = %image, "og:image found");
                    summary.fetched += 1;
                    image
                }
                Err(e) => {
                    warn!(
                        url = %url,
                        error = %e,
                        fallback = %self.fallback_image_url,
                        "Could not get og:image, using fallback"
                    );
                    summary.fallback += 1;
                    self.fallback_image_url.clone()
                }
            };

            if let Some(map) = candidate.as_object_mut() {
                map.insert(fields::IMAGE_URL.to_string(), Value::String(image));
            }
        }

        if summary.changed_batch() {
            write_json(batch_path, &batch.to_value())?;
            info!(
                batch = %batch_path.display(),
                fetched = summary.fetched,
                fallback = summary.fallback,
                "Image URLs written to incoming batch"
            );
        } else {
            info!(
                already_present = summary.already_present,
                "Incoming batch needs no enrichment"
            );
        }

        Ok(Enrichment::Enriched(summary))
    }
}

fn precondition_failure(batch: &IncomingBatch) -> Option<SkipReason> {
    if batch.is_empty() {
        return Some(SkipReason::EmptyBatch);
    }
    batch
        .candidates()
        .iter()
        .filter(|candidate| Record::check(candidate).is_ok())
        .find(|candidate| candidate_canonical_url(candidate).is_none())
        .map(|candidate| SkipReason::MissingCanonicalUrl {
            title: candidate
                .get(fields::TITLE)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })
}
