//! Baidu search scraper (`site:` queries excluding `www.`).

use super::search_engine::{PagedScrape, Tokenizer};
use super::source_lock::SourceLock;
use crate::config::SourceConfig;
use crate::enumeration::Source;
use crate::runtime::{EnumContext, ResultStream, result_channel};

pub const BAIDU_LABEL: &str = "baidu";

const BAIDU_ENDPOINT: &str = "https://www.baidu.com";

/// Source scraping <https://baidu.com> result pages
#[derive(Debug, Clone)]
pub struct Baidu {
    config: SourceConfig,
    lock: SourceLock,
    endpoint: String,
}

impl Baidu {
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            config: config.clone(),
            lock: SourceLock::new(config.max_concurrent_requests),
            endpoint: BAIDU_ENDPOINT.to_string(),
        }
    }

    /// Point the source at another host (mirrors, tests)
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for Baidu {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

fn page_url(endpoint: &str, domain: &str, page: usize) -> String {
    format!("{endpoint}/s?rn=10&pn={page}&wd=site%3A{domain}+-www.+&oq=site%3A{domain}+-www.+")
}

impl Source for Baidu {
    fn label(&self) -> &'static str {
        BAIDU_LABEL
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        let (tx, stream) = result_channel();

        let endpoint = self.endpoint.clone();
        let url_domain = domain.clone();
        let scrape = PagedScrape {
            label: BAIDU_LABEL,
            config: self.config.clone(),
            lock: self.lock.clone(),
            // Shorter lines cannot hold a subdomain of `domain`.
            tokenizer: Tokenizer::Lines {
                min_len: domain.len() + 2,
            },
            page_url: move |page| page_url(&endpoint, &url_domain, page),
        };
        tokio::spawn(scrape.run(ctx, domain, tx));

        stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(
            page_url(BAIDU_ENDPOINT, "example.com", 3),
            "https://www.baidu.com/s?rn=10&pn=3&wd=site%3Aexample.com+-www.+&oq=site%3Aexample.com+-www.+"
        );
    }
}
