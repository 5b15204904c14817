//! sitemap.xml generation (sitemaps.org 0.9)

use crate::error::SiteResult;
use crate::output::write_file;
use crate::pages::PAGES_DIR;
use crate::slug::{collapse_collisions, slugify};
use chrono::NaiveDate;
use noticias_common::record::fields;
use noticias_common::time::parse_publication_date;
use noticias_common::Record;
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SITEMAP_FILE: &str = "sitemap.xml";

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const CHANGEFREQ: &str = "yearly";
const PRIORITY: &str = "1.0";

/// One `<url>` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: &'static str,
    pub priority: &'static str,
}

/// Build one entry per article page
///
/// `lastmod` is the article's publication date, or `today` when the article
/// has none that parses.
pub fn build_sitemap(records: &[Record], base_url: &str, today: NaiveDate) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');

    let entries = records.iter().map(|record| {
        let slug = slugify(Some(record.title()));
        let lastmod = record
            .str_field(fields::PUBLISHED)
            .and_then(parse_publication_date)
            .unwrap_or(today);
        let entry = SitemapEntry {
            loc: format!("{}/{}/{}.html", base_url, PAGES_DIR, slug),
            lastmod,
            changefreq: CHANGEFREQ,
            priority: PRIORITY,
        };
        (slug, entry)
    });

    collapse_collisions(entries)
        .into_iter()
        .map(|(_, entry)| entry)
        .collect()
}

/// Render the urlset document
pub fn render_sitemap(entries: &[SitemapEntry]) -> SiteResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    writer
        .create_element("urlset")
        .with_attribute(("xmlns", SITEMAP_NS))
        .write_inner_content(|writer| {
            for entry in entries {
                let lastmod = entry.lastmod.format("%Y-%m-%d").to_string();
                writer.create_element("url").write_inner_content(|url| {
                    url.create_element("loc")
                        .write_text_content(BytesText::new(&entry.loc))?;
                    url.create_element("lastmod")
                        .write_text_content(BytesText::new(&lastmod))?;
                    url.create_element("changefreq")
                        .write_text_content(BytesText::new(entry.changefreq))?;
                    url.create_element("priority")
                        .write_text_content(BytesText::new(entry.priority))?;
                    Ok::<(), quick_xml::Error>(())
                })?;
            }
            Ok::<(), quick_xml::Error>(())
        })?;

    let mut xml = String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

/// Write `sitemap.xml` at the site root
pub fn write_sitemap(site_dir: &Path, xml: &str) -> SiteResult<PathBuf> {
    let path = site_dir.join(SITEMAP_FILE);
    write_file(&path, xml.as_bytes())?;
    info!("Sitemap written to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::try_from_value(value).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_entry_per_article() {
        let entries = build_sitemap(
            &[
                record(json!({"titular": "Hola Mundo", "fecha_publicacion": "2024-11-03T10:00:00+01:00"})),
                record(json!({"titular": "Sin fecha"})),
                record(json!({"titular": "Fecha rara", "fecha_publicacion": "ayer"})),
            ],
            "https://eitbnoticias.com/",
            today(),
        );

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].loc, "https://eitbnoticias.com/pages/hola-mundo.html");
        assert_eq!(entries[0].lastmod, NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
        assert_eq!(entries[1].lastmod, today());
        assert_eq!(entries[2].lastmod, today());
        assert!(entries.iter().all(|e| e.changefreq == "yearly" && e.priority == "1.0"));
    }

    #[test]
    fn test_render_escapes_loc() {
        let entries = [SitemapEntry {
            loc: "https://example.com/?a=1&b=2/pages/x.html".to_string(),
            lastmod: today(),
            changefreq: CHANGEFREQ,
            priority: PRIORITY,
        }];

        let xml = render_sitemap(&entries).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://example.com/?a=1&amp;b=2/pages/x.html</loc>"));
        assert!(xml.contains("<lastmod>2025-01-15</lastmod>"));
        assert!(xml.contains("<changefreq>yearly</changefreq>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_untitled_slug_instead_of_empty_loc() {
        let entries = build_sitemap(
            &[record(json!({"titular": "¿?"})), record(json!({"titular": "Ηλιος"}))],
            "https://eitbnoticias.com",
            today(),
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].loc, "https://eitbnoticias.com/pages/sin-titulo.html");
        let xml = render_sitemap(&entries).unwrap();
        assert!(!xml.contains("/pages/.html"));
    }

    #[test]
    fn test_empty_sitemap_is_valid_urlset() {
        let xml = render_sitemap(&[]).unwrap();
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.trim_end().ends_with("</urlset>"));
        assert!(!xml.contains("<url>"));
    }
}
