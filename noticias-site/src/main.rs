//! noticias-site - Page and sitemap generator
//!
//! Reads the article store (`_data/source.json`) and writes one
//! `pages/<slug>.html` per article and/or `sitemap.xml` under the site root.

use anyhow::{Context, Result};
use clap::Parser;
use noticias_common::config::{load_config, TomlConfig};
use noticias_common::logging::init_tracing;
use noticias_common::time;
use noticias_site::cli::Args;
use noticias_site::{generate, SiteConfig};
use std::process::ExitCode;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();

    let (file_config, config_source) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("noticias-site: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&file_config.log_level()) {
        eprintln!("noticias-site: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Starting noticias-site v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    match run(&args, &file_config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, file_config: &TomlConfig) -> Result<()> {
    let config = SiteConfig::resolve(&args.overrides, file_config)
        .context("Failed to resolve configuration")?;
    info!(
        store = %config.store_path.display(),
        site_dir = %config.site_dir.display(),
        base_url = %config.base_url,
        task = ?args.task,
        "Configuration resolved"
    );

    let report = generate(&config, args.task, time::now().date_naive())
        .context("Site generation failed")?;
    info!(
        articles = report.articles,
        pages = report.pages_written,
        sitemap_entries = report.sitemap_entries,
        "Generation finished"
    );
    Ok(())
}
