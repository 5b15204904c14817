//! Page planner
//!
//! Turns each stored article into a page under `pages/<slug>.html`. The page
//! file carries only YAML front matter; the site's `page` layout renders it.
//! Every field the layout reads is always present, filled with a Spanish
//! placeholder when the article lacks it.

use crate::error::{SiteError, SiteResult};
use crate::output::write_file;
use crate::slug::{collapse_collisions, slugify};
use noticias_common::record::fields;
use noticias_common::Record;
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Layout every article page uses
pub const PAGE_LAYOUT: &str = "page";

/// Directory under the site root holding article pages
pub const PAGES_DIR: &str = "pages";

/// Front matter of one article page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageData {
    pub layout: String,
    pub slug: String,
    #[serde(rename = "titular")]
    pub title: String,
    #[serde(rename = "categoria_emocional")]
    pub emotional_category: String,
    pub date: String,
    #[serde(rename = "url_canonical")]
    pub canonical_url: String,
    #[serde(rename = "url_imagen")]
    pub image_url: String,
    #[serde(rename = "resumen")]
    pub summary: String,
    #[serde(rename = "contexto")]
    pub context: String,
    #[serde(rename = "linea_tiempo")]
    pub timeline: Value,
    #[serde(rename = "quien_es_quien")]
    pub who_is_who: Value,
    #[serde(rename = "glosario_terminos")]
    pub glossary: Value,
    #[serde(rename = "impacto_esperado")]
    pub expected_impact: Value,
    #[serde(rename = "comparativas")]
    pub comparisons: Value,
}

impl PageData {
    pub fn from_record(record: &Record) -> Self {
        Self {
            layout: PAGE_LAYOUT.to_string(),
            slug: slugify(Some(record.title())),
            title: text_or(record, fields::TITLE, "Sin título"),
            emotional_category: text_or(record, fields::EMOTIONAL_CATEGORY, "Sin categoría emocional"),
            date: text_or(record, fields::PUBLISHED, "Fecha no disponible"),
            canonical_url: text_or(record, fields::CANONICAL_URL, ""),
            image_url: text_or(record, fields::IMAGE_URL, ""),
            summary: text_or(record, fields::SUMMARY, "Sin resumen disponible"),
            context: text_or(record, fields::CONTEXT, "Sin contexto disponible"),
            timeline: list_or_empty(record, fields::TIMELINE),
            who_is_who: list_or_empty(record, fields::WHO_IS_WHO),
            glossary: list_or_empty(record, fields::GLOSSARY),
            expected_impact: list_or_empty(record, fields::EXPECTED_IMPACT),
            comparisons: list_or_empty(record, fields::COMPARISONS),
        }
    }

    /// Path of this page relative to the site root
    pub fn relative_path(&self) -> PathBuf {
        Path::new(PAGES_DIR).join(format!("{}.html", self.slug))
    }

    /// Page file contents: YAML front matter block, empty body
    pub fn render(&self) -> Result<String, serde_yaml::Error> {
        // serde_yaml emits no document marker and ends with a newline
        Ok(format!("---\n{}---\n", serde_yaml::to_string(self)?))
    }
}

/// String field, or `default` when absent or null
///
/// Non-string values are kept as their JSON text.
fn text_or(record: &Record, field: &str, default: &str) -> String {
    match record.get(field) {
        None | Some(Value::Null) => default.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn list_or_empty(record: &Record, field: &str) -> Value {
    match record.get(field) {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(value) => value.clone(),
    }
}

/// Plan one page per article
///
/// Articles whose titles produce the same slug share one page; the later
/// article wins.
pub fn plan_pages(records: &[Record]) -> Vec<PageData> {
    let planned = records.iter().map(|record| {
        let page = PageData::from_record(record);
        (page.slug.clone(), page)
    });
    collapse_collisions(planned)
        .into_iter()
        .map(|(_, page)| page)
        .collect()
}

/// Write every planned page under `site_dir`
///
/// Returns the number of pages written.
pub fn write_pages(site_dir: &Path, pages: &[PageData]) -> SiteResult<usize> {
    for page in pages {
        let path = site_dir.join(page.relative_path());
        let content = page.render().map_err(|source| SiteError::FrontMatter {
            path: path.clone(),
            source,
        })?;
        write_file(&path, content.as_bytes())?;
        info!(title = %page.title, slug = %page.slug, "Page generated");
    }
    Ok(pages.len())
}
