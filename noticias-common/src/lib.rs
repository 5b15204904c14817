//! # Noticias Common Library
//!
//! Shared code for the noticias data tools including:
//! - Error type and result alias
//! - TOML configuration loading
//! - Tracing subscriber initialization
//! - Article record model and incoming batch normalization
//! - JSON file persistence (pretty, atomic)
//! - Timestamp utilities

pub mod config;
pub mod error;
pub mod json_file;
pub mod logging;
pub mod record;
pub mod time;

pub use error::{Error, Result};
pub use record::{IncomingBatch, Record};
