//! og:image client
//!
//! Resolves an article's representative image by fetching its canonical page
//! and reading the `content` of the `<meta property="og:image">` tag.
//!
//! The pipeline only sees the [`ImageFetcher`] trait, so tests run the engine
//! against a fake and no network is touched.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const USER_AGENT: &str = concat!("noticias-merge/", env!("CARGO_PKG_VERSION"));

/// Property name of the Open Graph image tag
const OG_IMAGE_PROPERTY: &str = "og:image";

static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("meta tag pattern is valid"));

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute pattern is valid")
});

/// og:image lookup errors
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Network communication error (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Page answered with a non-success status
    #[error("HTTP status {0}")]
    Status(u16),

    /// Page has no usable og:image tag
    #[error("No og:image meta tag found")]
    MissingTag,
}

/// Capability to find the representative image of a page
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Return the image URL advertised by the page at `url`
    async fn fetch_representative_image(&self, url: &str) -> Result<String, FetchError>;
}

/// HTTP implementation backed by reqwest
pub struct OgImageClient {
    http_client: Client,
}

impl OgImageClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl ImageFetcher for OgImageClient {
    async fn fetch_representative_image(&self, url: &str) -> Result<String, FetchError> {
        debug!(url = %url, "Fetching page for og:image");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        extract_og_image(&body).ok_or(FetchError::MissingTag)
    }
}

/// Find the og:image content in an HTML document
///
/// Takes the first `<meta>` whose `property` is `og:image` (case-insensitive),
/// whatever the attribute order or quoting. Returns `None` when there is no
/// such tag or its content is blank.
pub fn extract_og_image(html: &str) -> Option<String> {
    for tag in META_TAG.find_iter(html) {
        let mut property = None;
        let mut content = None;

        for caps in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str());
            match caps[1].to_ascii_lowercase().as_str() {
                "property" => property = value,
                "content" => content = value,
                _ => {}
            }
        }

        let is_og_image = property
            .map(|p| p.trim().eq_ignore_ascii_case(OG_IMAGE_PROPERTY))
            .unwrap_or(false);
        if is_og_image {
            return content
                .map(|c| decode_entities(c.trim()))
                .filter(|c| !c.is_empty());
        }
    }
    None
}

/// Decode the entities that show up in attribute values
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(OgImageClient::new(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_extracts_property_before_content() {
        let html = r#"<html><head>
            <meta charset="utf-8">
            <meta property="og:title" content="Titular">
            <meta property="og:image" content="https://cdn.example.com/a.jpg" />
        </head></html>"#;
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://cdn.example.com/a.jpg")
        );
    }

    #[test]
    fn test_extracts_content_before_property_single_quotes() {
        let html = "<META content='https://cdn.example.com/b.png' PROPERTY='OG:IMAGE'>";
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://cdn.example.com/b.png")
        );
    }

    #[test]
    fn test_multiline_tag_and_entities() {
        let html = "<meta\n  property=\"og:image\"\n  content=\"https://x.test/i.jpg?w=1&amp;h=2\">";
        assert_eq!(
            extract_og_image(html).as_deref(),
            Some("https://x.test/i.jpg?w=1&h=2")
        );
    }

    #[test]
    fn test_first_og_image_wins() {
        let html = r#"<meta property="og:image" content="https://a/1.jpg"><meta property="og:image" content="https://a/2.jpg">"#;
        assert_eq!(extract_og_image(html).as_deref(), Some("https://a/1.jpg"));
    }

    #[test]
    fn test_missing_or_blank_tag() {
        assert_eq!(extract_og_image("<html><head></head></html>"), None);
        assert_eq!(
            extract_og_image(r#"<meta name="twitter:image" content="https://a/t.jpg">"#),
            None
        );
        assert_eq!(
            extract_og_image(r#"<meta property="og:image" content="  ">"#),
            None
        );
        assert_eq!(extract_og_image(r#"<meta property="og:image">"#), None);
    }
}
