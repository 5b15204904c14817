//! noticias-merge library interface
//!
//! Merge-and-enrich pipeline for the news site data:
//! backup → og:image enrichment → validation → append → batch reset.
//!
//! Exposes public APIs for the binary and for integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod runner;
pub mod services;

pub use crate::config::{DuplicatePolicy, MergeConfig};
pub use crate::error::{MergeError, MergeResult};
pub use crate::runner::{run_task, TaskOutcome};
pub use crate::services::merge_engine::{MergeEngine, MergeOutcome, MergeReport, MergeState};
