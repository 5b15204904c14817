//! Record Validator
//!
//! Keeps the candidates that are well-formed articles (JSON objects with a
//! non-blank `titular`), in their original order. Every rejected candidate is
//! reported with its content so the producer of the data can fix it.

use noticias_common::Record;
use serde_json::Value;
use tracing::warn;

/// Validation result
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Validation {
    /// Accepted records, relative order preserved
    pub valid: Vec<Record>,
    /// Number of dropped candidates
    pub rejected: usize,
}

/// Filter `candidates` down to valid records
///
/// `origin` names the file the candidates came from ("store", "batch") and
/// only appears in the rejection reports.
pub fn validate_records(candidates: Vec<Value>, origin: &str) -> Validation {
    let mut validation = Validation::default();

    for (index, candidate) in candidates.into_iter().enumerate() {
        match Record::try_from_value(candidate) {
            Ok(record) => validation.valid.push(record),
            Err((reason, content)) => {
                warn!(
                    origin,
                    index,
                    reason = %reason,
                    record = %content,
                    "Dropping invalid record"
                );
                validation.rejected += 1;
            }
        }
    }

    validation
}
