//! Core configuration types for subdomain enumeration
//!
//! `EnumerationOptions` is the immutable per-call configuration of the
//! engine. `SourceConfig` tunes the bundled provider implementations.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::enumeration::SharedSource;
use crate::utils::{
    CHROME_USER_AGENT, DEFAULT_MAX_CONCURRENT_REQUESTS, DEFAULT_MAX_PAGES, DEFAULT_PAGE_DELAY_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Per-call configuration of the enumeration engine
#[derive(Debug, Clone, Default)]
pub struct EnumerationOptions {
    /// Sources queried for every domain, in diagnostic order
    pub(crate) sources: Vec<SharedSource>,
    /// Feed every discovered name back into enumeration
    pub(crate) recursive: bool,
    /// Dispatch recursion at most once per distinct name
    pub(crate) uniq: bool,
}

impl EnumerationOptions {
    /// Options querying `sources`, without recursion
    #[must_use]
    pub fn new(sources: Vec<SharedSource>) -> Self {
        Self {
            sources,
            recursive: false,
            uniq: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn sources(&self) -> &[SharedSource] {
        &self.sources
    }

    #[inline]
    #[must_use]
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    #[inline]
    #[must_use]
    pub fn uniq(&self) -> bool {
        self.uniq
    }

    /// Labels of the configured sources
    #[must_use]
    pub fn source_labels(&self) -> Vec<&'static str> {
        self.sources.iter().map(|source| source.label()).collect()
    }
}

/// Tuning for the bundled provider implementations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Result pages requested by paginated search-engine sources
    pub max_pages: usize,
    /// Timeout of one provider HTTP request
    pub request_timeout_secs: u64,
    /// In-flight requests allowed per source
    pub max_concurrent_requests: usize,
    /// Pause between two page requests of a paginated source
    pub page_delay_ms: u64,
    /// User agent of the shared HTTP client
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            user_agent: CHROME_USER_AGENT.to_string(),
        }
    }
}

impl SourceConfig {
    /// Reject values that would make every source a no-op or hang forever
    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be at least 1");
        }
        if self.max_concurrent_requests == 0 {
            bail!("max_concurrent_requests must be at least 1");
        }
        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[inline]
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_source_config_is_valid() {
        let config = SourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_pages, 750);
        assert_eq!(config.max_concurrent_requests, 1);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_source_config() {
        let zero_pages = SourceConfig {
            max_pages: 0,
            ..SourceConfig::default()
        };
        assert!(zero_pages.validate().is_err());

        let zero_concurrency = SourceConfig {
            max_concurrent_requests: 0,
            ..SourceConfig::default()
        };
        assert!(zero_concurrency.validate().is_err());
    }

    #[test]
    fn test_partial_source_config_deserializes_with_defaults() {
        let config: SourceConfig =
            serde_json::from_str(r#"{"max_pages": 5, "page_delay_ms": 250}"#).unwrap();
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.page_delay(), Duration::from_millis(250));
        assert_eq!(config.request_timeout_secs, 30);
    }
}
