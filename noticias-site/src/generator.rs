//! One generation run: load the store once, then emit pages and/or sitemap

use crate::cli::SiteTask;
use crate::config::SiteConfig;
use crate::error::SiteResult;
use crate::pages::{plan_pages, write_pages};
use crate::sitemap::{build_sitemap, render_sitemap, write_sitemap};
use crate::store::load_records;
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Valid articles in the store
    pub articles: usize,
    /// Page files written
    pub pages_written: usize,
    /// Sitemap file, when generated
    pub sitemap_path: Option<PathBuf>,
    pub sitemap_entries: usize,
}

/// Run `task` against the configured store and site root
///
/// `today` is the `lastmod` for articles without a publication date.
pub fn generate(config: &SiteConfig, task: SiteTask, today: NaiveDate) -> SiteResult<GenerationReport> {
    let records = load_records(&config.store_path)?;
    let mut report = GenerationReport {
        articles: records.len(),
        ..GenerationReport::default()
    };

    if task.includes_pages() {
        let pages = plan_pages(&records);
        report.pages_written = write_pages(&config.site_dir, &pages)?;
        info!("Page generation completed: {} pages", report.pages_written);
    }

    if task.includes_sitemap() {
        let entries = build_sitemap(&records, &config.base_url, today);
        let xml = render_sitemap(&entries)?;
        report.sitemap_path = Some(write_sitemap(&config.site_dir, &xml)?);
        report.sitemap_entries = entries.len();
    }

    Ok(report)
}
