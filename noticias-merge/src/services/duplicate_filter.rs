//! Duplicate handling for incoming articles

use crate::config::DuplicatePolicy;
use noticias_common::Record;
use std::collections::HashSet;
use tracing::warn;

/// Apply `policy` to the validated incoming records
///
/// Returns the records to append and how many were dropped. Under
/// [`DuplicatePolicy::Keep`] nothing is dropped.
pub fn filter_duplicates(
    policy: DuplicatePolicy,
    store: &[Record],
    incoming: Vec<Record>,
) -> (Vec<Record>, usize) {
    match policy {
        DuplicatePolicy::Keep => (incoming, 0),
        DuplicatePolicy::SkipCanonical => {
            let mut seen: HashSet<String> = store
                .iter()
                .filter_map(|r| r.canonical_url().map(str::to_owned))
                .collect();
            let mut dropped = 0;

            let kept = incoming
                .into_iter()
                .filter(|record| match record.canonical_url() {
                    Some(url) if !seen.insert(url.to_owned()) => {
                        warn!(
                            title = %record.title(),
                            url = %url,
                            "Skipping duplicate article"
                        );
                        dropped += 1;
                        false
                    }
                    _ => true,
                })
                .collect();

            (kept, dropped)
        }
    }
}
