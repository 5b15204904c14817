//! Page slugs
//!
//! Published page URLs were derived from the title as: lowercase, trim,
//! whitespace to `-`, then drop everything outside `[A-Za-z0-9_-]`.
//! Accented letters are therefore dropped, not transliterated; changing that
//! would break existing links.

use std::collections::HashMap;
use tracing::warn;

/// Slug used for an article without a usable title
pub const UNTITLED_SLUG: &str = "sin-titulo";

/// Derive the page slug from an article title
///
/// Never empty: a title with nothing left after filtering (e.g. only
/// punctuation or non-Latin script) gets [`UNTITLED_SLUG`].
pub fn slugify(title: Option<&str>) -> String {
    let Some(title) = title.filter(|t| !t.trim().is_empty()) else {
        return UNTITLED_SLUG.to_string();
    };

    let slug: String = title
        .to_lowercase()
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect();

    if slug.is_empty() {
        warn!(title = %title, "Title yields no slug characters, using '{}'", UNTITLED_SLUG);
        return UNTITLED_SLUG.to_string();
    }
    slug
}

/// Collapse entries that share a slug
///
/// The later entry replaces the earlier one at the earlier one's position.
pub fn collapse_collisions<T>(entries: impl IntoIterator<Item = (String, T)>) -> Vec<(String, T)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut collapsed: Vec<(String, T)> = Vec::new();

    for (slug, item) in entries {
        match positions.get(&slug) {
            Some(&index) => {
                warn!(slug = %slug, "Slug collision, later article replaces earlier one");
                collapsed[index] = (slug, item);
            }
            None => {
                positions.insert(slug.clone(), collapsed.len());
                collapsed.push((slug, item));
            }
        }
    }
    collapsed
}
