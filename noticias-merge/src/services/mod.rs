//! Pipeline services
//!
//! Leaves first: the validator, the og:image client and the archiver are used
//! by the enricher and the engine; the engine orchestrates all of them.

pub mod backup_archiver;
pub mod duplicate_filter;
pub mod merge_engine;
pub mod metadata_enricher;
pub mod og_image_client;
pub mod record_validator;

pub use backup_archiver::BackupArchiver;
pub use merge_engine::{MergeEngine, MergeOutcome, MergeReport, MergeState};
pub use metadata_enricher::{Enrichment, EnrichmentSummary, MetadataEnricher, SkipReason};
pub use og_image_client::{FetchError, ImageFetcher, OgImageClient};
pub use record_validator::{validate_records, Validation};
