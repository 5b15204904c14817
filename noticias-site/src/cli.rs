//! Command-line surface of noticias-site

use crate::config::SiteOverrides;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for noticias-site
#[derive(Parser, Debug)]
#[command(name = "noticias-site")]
#[command(about = "Generate article pages and sitemap.xml from the site data store")]
#[command(version)]
pub struct Args {
    /// What to generate
    #[arg(value_enum)]
    pub task: SiteTask,

    /// TOML configuration file
    #[arg(long, env = "NOTICIAS_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: SiteOverrides,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SiteTask {
    /// pages/<slug>.html for every article
    Pages,
    /// sitemap.xml
    Sitemap,
    /// Both
    All,
}

impl SiteTask {
    pub fn includes_pages(self) -> bool {
        matches!(self, SiteTask::Pages | SiteTask::All)
    }

    pub fn includes_sitemap(self) -> bool {
        matches!(self, SiteTask::Sitemap | SiteTask::All)
    }
}
