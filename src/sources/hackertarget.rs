//! HackerTarget `hostsearch` API (passive DNS, CSV `host,ip` lines).

use super::http_client::fetch_text;
use super::source_lock::SourceLock;
use crate::config::SourceConfig;
use crate::enumeration::{Source, SourceError, SubdomainResult};
use crate::runtime::{EnumContext, ResultSender, ResultStream, result_channel};
use crate::utils::is_strict_subdomain;

pub const HACKERTARGET_LABEL: &str = "hackertarget";

const HACKERTARGET_ENDPOINT: &str = "https://api.hackertarget.com";

/// Source querying the HackerTarget host search API
#[derive(Debug, Clone)]
pub struct HackerTarget {
    config: SourceConfig,
    lock: SourceLock,
    endpoint: String,
}

impl HackerTarget {
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            config: config.clone(),
            lock: SourceLock::new(config.max_concurrent_requests),
            endpoint: HACKERTARGET_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for HackerTarget {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

/// Hosts from a `hostsearch` body that are strict subdomains of `domain`
///
/// The API reports quota and input problems as a 200 with a plain-text
/// message instead of CSV.
fn parse_hostsearch(body: &str, domain: &str) -> Result<Vec<String>, SourceError> {
    let trimmed = body.trim();
    if trimmed.starts_with("error") || trimmed.starts_with("API count exceeded") {
        return Err(SourceError::Parse(trimmed.lines().next().unwrap_or(trimmed).to_string()));
    }

    Ok(trimmed
        .lines()
        .filter_map(|line| line.split(',').next())
        .map(|host| host.trim().trim_end_matches('.').to_lowercase())
        .filter(|host| !host.starts_with("*.") && is_strict_subdomain(host, domain))
        .collect())
}

async fn run(
    config: SourceConfig,
    lock: SourceLock,
    endpoint: String,
    ctx: EnumContext,
    domain: String,
    tx: ResultSender,
) {
    let _permit = match lock.acquire(&ctx).await {
        Ok(permit) => permit,
        Err(e) => {
            tx.send(&ctx, SubdomainResult::failure(HACKERTARGET_LABEL, e)).await;
            return;
        }
    };

    let url = format!(
        "{endpoint}/hostsearch/?q={}",
        urlencoding::encode(&domain)
    );
    let hosts = match fetch_text(&ctx, &config, &url)
        .await
        .and_then(|body| parse_hostsearch(&body, &domain))
    {
        Ok(hosts) => hosts,
        Err(e) => {
            tx.send(&ctx, SubdomainResult::failure(HACKERTARGET_LABEL, e)).await;
            return;
        }
    };

    for host in hosts {
        if !tx.send(&ctx, SubdomainResult::success(HACKERTARGET_LABEL, host)).await {
            return;
        }
    }
}

impl Source for HackerTarget {
    fn label(&self) -> &'static str {
        HACKERTARGET_LABEL
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        let (tx, stream) = result_channel();
        tokio::spawn(run(
            self.config.clone(),
            self.lock.clone(),
            self.endpoint.clone(),
            ctx,
            domain,
            tx,
        ));
        stream
    }
}
