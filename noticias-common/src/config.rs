//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (clap also folds in the matching environment variable)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing TOML file never terminates a run: it produces a warning (or a
//! debug line when the file was only looked up implicitly) and the compiled defaults apply.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "noticias.toml";

/// Compiled defaults, matching the site repository layout
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub store_path: PathBuf,
    pub batch_path: PathBuf,
    pub backup_dir: PathBuf,
    pub fallback_image_url: String,
    pub fetch_timeout_secs: u64,
    pub site_dir: PathBuf,
    pub base_url: String,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("_data/source.json"),
            batch_path: PathBuf::from("_data/update.json"),
            backup_dir: PathBuf::from("_data/backups"),
            fallback_image_url: "https://eitbnoticias.com/assets/images/default-og.jpg".to_string(),
            fetch_timeout_secs: 30,
            site_dir: PathBuf::from("."),
            base_url: "https://eitbnoticias.com".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Configuration file contents
///
/// Every field is optional; absent fields fall back to [`CompiledDefaults`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Accumulating store (JSON array of articles)
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Incoming batch (single article or array)
    #[serde(default)]
    pub batch_path: Option<PathBuf>,

    /// Directory receiving `source-<timestamp>.json` snapshots
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,

    /// Image URL used when og:image cannot be fetched
    #[serde(default)]
    pub fallback_image_url: Option<String>,

    /// Timeout for the og:image fetch
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,

    /// "keep" or "skip-canonical"
    #[serde(default)]
    pub duplicate_policy: Option<String>,

    /// Root of the generated site (pages/ and sitemap.xml)
    #[serde(default)]
    pub site_dir: Option<PathBuf>,

    /// Public base URL used in the sitemap
    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

impl TomlConfig {
    /// Effective log level (config value or compiled default)
    pub fn log_level(&self) -> String {
        self.logging
            .level
            .clone()
            .unwrap_or_else(|| CompiledDefaults::default().log_level)
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Locate the config file to use
///
/// An explicit path (from `--config` or `NOTICIAS_CONFIG`) is returned as is.
/// Otherwise `./noticias.toml`, then `<config dir>/noticias/config.toml`.
pub fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("noticias").join("config.toml"))
        .filter(|p| p.exists())
}

/// Where the file configuration came from
///
/// `load_config` runs before the tracing subscriber exists (the log level is
/// part of the file), so the outcome is returned and logged by the caller
/// once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was requested but does not exist
    Missing(PathBuf),
    /// No file requested or found
    Defaults,
}

impl ConfigSource {
    /// Report the outcome through tracing
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            ),
            ConfigSource::Defaults => debug!("No config file found, using compiled defaults"),
        }
    }
}

/// Load configuration with graceful degradation
///
/// Missing files yield defaults; a file that exists but does not parse is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let Some(path) = locate_config_file(explicit) else {
        return Ok((TomlConfig::default(), ConfigSource::Defaults));
    };

    if !path.exists() {
        return Ok((TomlConfig::default(), ConfigSource::Missing(path)));
    }

    let config = load_toml_config(&path)?;
    Ok((config, ConfigSource::File(path)))
}

/// Pick the first available value: command line, then file, then default
pub fn resolve<T>(cli: Option<T>, file: Option<T>, default: T) -> T {
    cli.or(file).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[test]
    fn test_resolve_prefers_cli_then_file() {
        assert_eq!(resolve(Some(1), Some(2), 3), 1);
        assert_eq!(resolve(None, Some(2), 3), 2);
        assert_eq!(resolve(None, None, 3), 3);
    }

    #[test]
    fn test_partial_toml_leaves_other_fields_unset() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noticias.toml");
        std::fs::write(
            &path,
            "store_path = \"data/store.json\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let config = load_toml_config(&path).unwrap();
        assert_eq!(config.store_path, Some(PathBuf::from("data/store.json")));
        assert_eq!(config.batch_path, None);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_missing_explicit_file_degrades_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let (config, source) = load_config(Some(&path)).unwrap();
        assert_eq!(config, TomlConfig::default());
        assert_eq!(source, ConfigSource::Missing(path.clone()));
        assert_eq!(config.log_level(), "info");
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_missing_file_warning_is_emitted_once_logging_is_up() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("typo.toml");
        let (_, source) = load_config(Some(&path)).unwrap();

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || source.log());

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"), "{}", output);
        assert!(output.contains("typo.toml not found"), "{}", output);
    }

    #[test]
    fn test_loaded_file_is_reported_as_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noticias.toml");
        std::fs::write(&path, "base_url = \"https://example.org\"\n").unwrap();

        let (config, source) = load_config(Some(&path)).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://example.org"));
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "store_path = [unterminated").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
