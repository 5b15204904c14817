//! Configuration resolution for noticias-merge
//!
//! Provides multi-tier resolution: command line (or its environment variable)
//! → TOML config file → compiled default. The result is an explicit
//! [`MergeConfig`] handed to the engine at construction.

use clap::ValueEnum;
use noticias_common::config::{resolve, CompiledDefaults, TomlConfig};
use noticias_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// What to do with incoming articles already present in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DuplicatePolicy {
    /// Append everything (duplicates accumulate)
    #[default]
    Keep,
    /// Drop incoming articles whose url_canonical is already stored or
    /// appears earlier in the same batch
    SkipCanonical,
}

/// Command-line / environment overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct MergeOverrides {
    /// Accumulating store (JSON array)
    #[arg(long = "store", env = "NOTICIAS_STORE", value_name = "FILE")]
    pub store_path: Option<PathBuf>,

    /// Incoming batch (article object or array)
    #[arg(long = "batch", env = "NOTICIAS_BATCH", value_name = "FILE")]
    pub batch_path: Option<PathBuf>,

    /// Directory for store snapshots
    #[arg(long, env = "NOTICIAS_BACKUP_DIR", value_name = "DIR")]
    pub backup_dir: Option<PathBuf>,

    /// Image URL used when og:image cannot be fetched
    #[arg(long, env = "NOTICIAS_FALLBACK_IMAGE_URL", value_name = "URL")]
    pub fallback_image_url: Option<String>,

    /// Timeout for the og:image request (seconds)
    #[arg(long, env = "NOTICIAS_FETCH_TIMEOUT_SECS", value_name = "SECS")]
    pub fetch_timeout_secs: Option<u64>,

    /// Duplicate handling for incoming articles
    #[arg(long = "dedup", env = "NOTICIAS_DEDUP", value_enum)]
    pub duplicate_policy: Option<DuplicatePolicy>,
}

/// Resolved pipeline configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MergeConfig {
    pub store_path: PathBuf,
    pub batch_path: PathBuf,
    pub backup_dir: PathBuf,
    pub fallback_image_url: String,
    pub fetch_timeout: Duration,
    pub duplicate_policy: DuplicatePolicy,
}

impl MergeConfig {
    /// Resolve every option from overrides, then the file, then defaults
    pub fn resolve(overrides: &MergeOverrides, file: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let file_policy = match file.duplicate_policy.as_deref() {
            Some(name) => Some(DuplicatePolicy::from_str(name, true).map_err(|_| {
                Error::Config(format!(
                    "Unknown duplicate_policy '{}' (expected 'keep' or 'skip-canonical')",
                    name
                ))
            })?),
            None => None,
        };

        let config = Self {
            store_path: resolve(
                overrides.store_path.clone(),
                file.store_path.clone(),
                defaults.store_path,
            ),
            batch_path: resolve(
                overrides.batch_path.clone(),
                file.batch_path.clone(),
                defaults.batch_path,
            ),
            backup_dir: resolve(
                overrides.backup_dir.clone(),
                file.backup_dir.clone(),
                defaults.backup_dir,
            ),
            fallback_image_url: resolve(
                overrides.fallback_image_url.clone(),
                file.fallback_image_url.clone(),
                defaults.fallback_image_url,
            ),
            fetch_timeout: Duration::from_secs(resolve(
                overrides.fetch_timeout_secs,
                file.fetch_timeout_secs,
                defaults.fetch_timeout_secs,
            )),
            duplicate_policy: resolve(overrides.duplicate_policy, file_policy, DuplicatePolicy::Keep),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.fallback_image_url.trim().is_empty() {
            return Err(Error::Config("fallback_image_url must not be blank".to_string()));
        }
        if self.fetch_timeout.is_zero() {
            return Err(Error::Config("fetch_timeout_secs must be greater than zero".to_string()));
        }
        if self.store_path == self.batch_path {
            return Err(Error::Config(format!(
                "store and batch point at the same file: {}",
                self.store_path.display()
            )));
        }
        if self.duplicate_policy == DuplicatePolicy::SkipCanonical {
            warn!("Duplicate policy 'skip-canonical' active: repeated url_canonical values are dropped");
        }
        Ok(())
    }
}
