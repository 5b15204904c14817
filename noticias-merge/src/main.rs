//! noticias-merge - Site data merge tool
//!
//! Merges the incoming article batch (`_data/update.json`) into the
//! accumulating store (`_data/source.json`), filling each article's
//! `url_imagen` from its canonical page's og:image, after snapshotting the
//! store into the backup directory.
//!
//! Exit status: 0 on success or an informational stop, 1 on an aborted run,
//! 2 on a usage error (unknown task, bad flag).

use anyhow::{Context, Result};
use clap::Parser;
use noticias_common::config::{load_config, TomlConfig};
use noticias_common::logging::init_tracing;
use noticias_merge::cli::Args;
use noticias_merge::services::{Enrichment, ImageFetcher, OgImageClient};
use noticias_merge::{run_task, MergeConfig, MergeOutcome, TaskOutcome};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let (file_config, config_source) = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("noticias-merge: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(&file_config.log_level()) {
        eprintln!("noticias-merge: {}", e);
        return ExitCode::FAILURE;
    }

    info!(
        "Starting noticias-merge v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    config_source.log();

    match run(&args, file_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, file_config: TomlConfig) -> Result<()> {
    let task = args.task;
    let config = MergeConfig::resolve(&args.overrides, &file_config)
        .context("Failed to resolve configuration")?;
    info!(
        store = %config.store_path.display(),
        batch = %config.batch_path.display(),
        backup_dir = %config.backup_dir.display(),
        ?task,
        "Configuration resolved"
    );

    let outcome = run_task(task, config, |config| {
        let client = OgImageClient::new(config.fetch_timeout)?;
        Ok(Arc::new(client) as Arc<dyn ImageFetcher>)
    })
    .await
    .with_context(|| format!("Task {:?} failed", task))?;

    match outcome {
        TaskOutcome::BackedUp(snapshot) => info!("Backup written to {}", snapshot.display()),
        TaskOutcome::Enrichment(Enrichment::Enriched(summary)) => info!(
            fetched = summary.fetched,
            fallback = summary.fallback,
            already_present = summary.already_present,
            "Enrichment finished"
        ),
        TaskOutcome::Enrichment(Enrichment::Skipped(reason)) => {
            info!("Enrichment skipped: {}", reason)
        }
        TaskOutcome::Merge(MergeOutcome::Merged(report)) => info!(
            appended = report.appended,
            total = report.store_after,
            backup = %report.backup_path.display(),
            "Merge finished"
        ),
        TaskOutcome::Merge(MergeOutcome::Skipped(reason)) => info!("Nothing merged: {}", reason),
        TaskOutcome::Merge(MergeOutcome::NothingToMerge { rejected }) => {
            info!("Nothing merged: incoming batch has no valid articles ({} rejected)", rejected)
        }
    }

    Ok(())
}
