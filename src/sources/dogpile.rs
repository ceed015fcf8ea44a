//! DogPile metasearch scraper.
//!
//! Uses plain http: dogpile's certificate has been unreliable.

use super::search_engine::{PagedScrape, Tokenizer};
use super::source_lock::SourceLock;
use crate::config::SourceConfig;
use crate::enumeration::Source;
use crate::runtime::{EnumContext, ResultStream, result_channel};

pub const DOGPILE_LABEL: &str = "dogpile";

const DOGPILE_ENDPOINT: &str = "http://www.dogpile.com";

/// Results per DogPile page; `qsi` is the 1-based index of the first one
const RESULTS_PER_PAGE: usize = 15;

/// Source scraping <http://dogpile.com> result pages
#[derive(Debug, Clone)]
pub struct DogPile {
    config: SourceConfig,
    lock: SourceLock,
    endpoint: String,
}

impl DogPile {
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            config: config.clone(),
            lock: SourceLock::new(config.max_concurrent_requests),
            endpoint: DOGPILE_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for DogPile {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

fn page_url(endpoint: &str, domain: &str, page: usize) -> String {
    let first_result = page * RESULTS_PER_PAGE + 1;
    format!("{endpoint}/search/web?q={domain}&qsi={first_result}")
}

impl Source for DogPile {
    fn label(&self) -> &'static str {
        DOGPILE_LABEL
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        let (tx, stream) = result_channel();

        let endpoint = self.endpoint.clone();
        let url_domain = domain.clone();
        let scrape = PagedScrape {
            label: DOGPILE_LABEL,
            config: self.config.clone(),
            lock: self.lock.clone(),
            tokenizer: Tokenizer::Words,
            page_url: move |page| page_url(&endpoint, &url_domain, page),
        };
        tokio::spawn(scrape.run(ctx, domain, tx));

        stream
    }
}
