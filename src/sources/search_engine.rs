//! Shared driver for paginated search-engine scrapers
//!
//! Baidu and DogPile differ only in how a result page URL is built and how
//! the page text is split before extraction; everything else (locking,
//! pagination, cancellation, failure reporting) lives here.

use log::debug;
use std::time::Duration;

use super::extractor::SubdomainExtractor;
use super::http_client::fetch_text;
use super::source_lock::SourceLock;
use crate::config::SourceConfig;
use crate::enumeration::SubdomainResult;
use crate::runtime::{EnumContext, ResultSender};

/// How page text is cut into chunks handed to the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    /// One chunk per line; lines shorter than `min_len` bytes are skipped
    Lines { min_len: usize },
    /// One chunk per whitespace-separated word
    Words,
}

impl Tokenizer {
    fn chunks<'a>(self, body: &'a str) -> Box<dyn Iterator<Item = &'a str> + Send + 'a> {
        match self {
            Self::Lines { min_len } => Box::new(body.lines().filter(move |line| line.len() >= min_len)),
            Self::Words => Box::new(body.split_whitespace()),
        }
    }
}

/// Everything one paginated scrape needs
pub struct PagedScrape<F> {
    pub label: &'static str,
    pub config: SourceConfig,
    pub lock: SourceLock,
    pub tokenizer: Tokenizer,
    /// Builds the URL of a 1-based result page
    pub page_url: F,
}

impl<F> PagedScrape<F>
where
    F: Fn(usize) -> String + Send,
{
    /// Walk result pages for `domain`, emitting every extracted subdomain
    ///
    /// Stops at `config.max_pages`, on the first failure (reported once), or
    /// as soon as the context is done or the reader has gone away. Dropping
    /// `tx` on return closes the source's stream.
    pub async fn run(self, ctx: EnumContext, domain: String, tx: ResultSender) {
        let Self {
            label,
            config,
            lock,
            tokenizer,
            page_url,
        } = self;

        let _permit = match lock.acquire(&ctx).await {
            Ok(permit) => permit,
            Err(e) => {
                tx.send(&ctx, SubdomainResult::failure(label, e)).await;
                return;
            }
        };

        let extractor = match SubdomainExtractor::new(&domain) {
            Ok(extractor) => extractor,
            Err(e) => {
                tx.send(&ctx, SubdomainResult::failure(label, e)).await;
                return;
            }
        };

        let mut emitted = 0usize;
        for page in 1..=config.max_pages {
            let url = page_url(page);
            let body = match fetch_text(&ctx, &config, &url).await {
                Ok(body) => body,
                Err(e) => {
                    tx.send(&ctx, SubdomainResult::failure(label, e)).await;
                    return;
                }
            };

            for chunk in tokenizer.chunks(&body) {
                if ctx.is_done() {
                    return;
                }
                if let Some(name) = extractor.extract(chunk) {
                    if !tx.send(&ctx, SubdomainResult::success(label, name)).await {
                        return;
                    }
                    emitted += 1;
                }
            }

            if !pause(&ctx, config.page_delay()).await {
                return;
            }
        }

        debug!(
            target: "subdomains::sources",
            "{label}: {emitted} candidates for {domain} in {} pages",
            config.max_pages
        );
    }
}

/// Sleep between pages; `false` if the context finished meanwhile
async fn pause(ctx: &EnumContext, delay: Duration) -> bool {
    if delay.is_zero() {
        return !ctx.is_done();
    }
    tokio::select! {
        biased;
        () = ctx.done() => false,
        () = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_tokenizer_skips_short_lines() {
        let body = "a.b\nwww.example.com\n\nxx";
        let chunks: Vec<&str> = Tokenizer::Lines { min_len: 13 }.chunks(body).collect();
        assert_eq!(chunks, vec!["www.example.com"]);
    }

    #[test]
    fn test_word_tokenizer() {
        let body = "see  www.example.com\tand\napi.example.com";
        let chunks: Vec<&str> = Tokenizer::Words.chunks(body).collect();
        assert_eq!(chunks, vec!["see", "www.example.com", "and", "api.example.com"]);
    }
}
