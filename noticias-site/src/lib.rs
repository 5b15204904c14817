//! noticias-site library interface
//!
//! Static-site generation from the article store: one front-matter page per
//! article under `pages/`, plus `sitemap.xml`.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod output;
pub mod pages;
pub mod sitemap;
pub mod slug;
pub mod store;

pub use crate::config::SiteConfig;
pub use crate::error::{SiteError, SiteResult};
pub use crate::generator::{generate, GenerationReport};
