//! Bundled provider implementations
//!
//! The engine only knows the [`Source`](crate::enumeration::Source) trait;
//! this module ships a few real providers plus the helpers they share (the
//! process-wide HTTP client, the text extractor and per-source locking).

pub mod baidu;
pub mod crtsh;
pub mod dogpile;
pub mod extractor;
pub mod hackertarget;
pub mod http_client;
pub mod search_engine;
pub mod source_lock;

use std::sync::Arc;

pub use baidu::{BAIDU_LABEL, Baidu};
pub use crtsh::{CRTSH_LABEL, CrtSh};
pub use dogpile::{DOGPILE_LABEL, DogPile};
pub use extractor::SubdomainExtractor;
pub use hackertarget::{HACKERTARGET_LABEL, HackerTarget};
pub use http_client::{fetch_text, shared_client};
pub use source_lock::SourceLock;

use crate::config::SourceConfig;
use crate::enumeration::SharedSource;

/// Names accepted by [`source_by_name`], in default query order
pub const SOURCE_NAMES: &[&str] = &[CRTSH_LABEL, HACKERTARGET_LABEL, BAIDU_LABEL, DOGPILE_LABEL];

/// Build the source registered under `name` (case-insensitive)
#[must_use]
pub fn source_by_name(name: &str, config: &SourceConfig) -> Option<SharedSource> {
    let source: SharedSource = match name.trim().to_lowercase().as_str() {
        BAIDU_LABEL => Arc::new(Baidu::new(config)),
        CRTSH_LABEL => Arc::new(CrtSh::new(config)),
        DOGPILE_LABEL => Arc::new(DogPile::new(config)),
        HACKERTARGET_LABEL => Arc::new(HackerTarget::new(config)),
        _ => return None,
    };
    Some(source)
}

/// Every bundled source
#[must_use]
pub fn all_sources(config: &SourceConfig) -> Vec<SharedSource> {
    SOURCE_NAMES
        .iter()
        .filter_map(|name| source_by_name(name, config))
        .collect()
}
