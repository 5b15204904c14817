//! Shared fixtures for noticias-merge integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use noticias_merge::services::{FetchError, ImageFetcher};
use noticias_merge::{DuplicatePolicy, MergeConfig, MergeEngine};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

pub const FALLBACK_IMAGE: &str = "https://eitbnoticias.test/default.jpg";

/// Fake og:image source: answers from a fixed map, fails for unknown URLs
#[derive(Default)]
pub struct FakeFetcher {
    images: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    /// Fetcher that fails every request
    pub fn failing() -> Self {
        Self::default()
    }

    /// Fetcher that knows one page
    pub fn with(url: &str, image: &str) -> Self {
        Self::default().and(url, image)
    }

    pub fn and(mut self, url: &str, image: &str) -> Self {
        self.images.insert(url.to_string(), image.to_string());
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for FakeFetcher {
    async fn fetch_representative_image(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Network(format!("unreachable: {}", url)))
    }
}

/// Store, batch and backup directory inside a temp dir
pub struct Fixture {
    pub dir: TempDir,
    pub config: MergeConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("_data");
        std::fs::create_dir_all(&data).unwrap();
        let config = MergeConfig {
            store_path: data.join("source.json"),
            batch_path: data.join("update.json"),
            backup_dir: data.join("backups"),
            fallback_image_url: FALLBACK_IMAGE.to_string(),
            fetch_timeout: Duration::from_secs(1),
            duplicate_policy: DuplicatePolicy::Keep,
        };
        Self { dir, config }
    }

    pub fn with_store(self, store: &Value) -> Self {
        write(&self.config.store_path, store);
        self
    }

    pub fn with_batch(self, batch: &Value) -> Self {
        write(&self.config.batch_path, batch);
        self
    }

    pub fn engine(&self, fetcher: Arc<FakeFetcher>) -> MergeEngine {
        MergeEngine::new(self.config.clone(), fetcher)
    }

    pub fn store(&self) -> Value {
        read(&self.config.store_path)
    }

    pub fn batch(&self) -> Value {
        read(&self.config.batch_path)
    }

    pub fn store_bytes(&self) -> String {
        std::fs::read_to_string(&self.config.store_path).unwrap()
    }

    pub fn batch_bytes(&self) -> String {
        std::fs::read_to_string(&self.config.batch_path).unwrap()
    }

    /// Snapshot files currently in the backup directory
    pub fn backups(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(&self.config.backup_dir) {
            Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }
}

pub fn write(path: &Path, value: &Value) {
    std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
}

pub fn read(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Keys of a JSON object in file order
pub fn keys(value: &Value) -> Vec<String> {
    value.as_object().unwrap().keys().cloned().collect()
}
