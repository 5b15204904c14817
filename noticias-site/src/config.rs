//! Configuration resolution for noticias-site
//!
//! Same layering as the merge tool: command line (or its environment
//! variable) → TOML config file → compiled default.

use noticias_common::config::{resolve, CompiledDefaults, TomlConfig};
use noticias_common::{Error, Result};
use std::path::PathBuf;

/// Command-line / environment overrides
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SiteOverrides {
    /// Article store (JSON array)
    #[arg(long = "store", env = "NOTICIAS_STORE", value_name = "FILE")]
    pub store_path: Option<PathBuf>,

    /// Site root receiving pages/ and sitemap.xml
    #[arg(long, env = "NOTICIAS_SITE_DIR", value_name = "DIR")]
    pub site_dir: Option<PathBuf>,

    /// Public base URL of the site
    #[arg(long, env = "NOTICIAS_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,
}

/// Resolved site generation configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub store_path: PathBuf,
    pub site_dir: PathBuf,
    /// Without trailing slash
    pub base_url: String,
}

impl SiteConfig {
    pub fn resolve(overrides: &SiteOverrides, file: &TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let base_url = resolve(
            overrides.base_url.clone(),
            file.base_url.clone(),
            defaults.base_url,
        );

        let config = Self {
            store_path: resolve(
                overrides.store_path.clone(),
                file.store_path.clone(),
                defaults.store_path,
            ),
            site_dir: resolve(overrides.site_dir.clone(), file.site_dir.clone(), defaults.site_dir),
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::resolve(&SiteOverrides::default(), &TomlConfig::default()).unwrap();
        assert_eq!(config.store_path, PathBuf::from("_data/source.json"));
        assert_eq!(config.site_dir, PathBuf::from("."));
        assert_eq!(config.base_url, "https://eitbnoticias.com");
    }

    #[test]
    fn test_base_url_layering_and_trailing_slash() {
        let file = TomlConfig {
            base_url: Some("https://staging.eitbnoticias.com/".to_string()),
            site_dir: Some(PathBuf::from("_site")),
            ..TomlConfig::default()
        };
        let config = SiteConfig::resolve(&SiteOverrides::default(), &file).unwrap();
        assert_eq!(config.base_url, "https://staging.eitbnoticias.com");
        assert_eq!(config.site_dir, PathBuf::from("_site"));

        let overrides = SiteOverrides {
            base_url: Some("http://localhost:4000".to_string()),
            ..SiteOverrides::default()
        };
        let config = SiteConfig::resolve(&overrides, &file).unwrap();
        assert_eq!(config.base_url, "http://localhost:4000");
    }

    #[test]
    fn test_non_http_base_url_rejected() {
        let overrides = SiteOverrides {
            base_url: Some("eitbnoticias.com".to_string()),
            ..SiteOverrides::default()
        };
        let err = SiteConfig::resolve(&overrides, &TomlConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
