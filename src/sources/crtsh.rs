//! crt.sh certificate-transparency search.

use serde::Deserialize;
use std::collections::HashSet;

use super::http_client::fetch_text;
use super::source_lock::SourceLock;
use crate::config::SourceConfig;
use crate::enumeration::{Source, SourceError, SubdomainResult};
use crate::runtime::{EnumContext, ResultSender, ResultStream, result_channel};
use crate::utils::is_strict_subdomain;

pub const CRTSH_LABEL: &str = "crtsh";

const CRTSH_ENDPOINT: &str = "https://crt.sh";

#[derive(Debug, Deserialize)]
struct CertificateEntry {
    /// Newline-separated SAN/CN names of one certificate
    name_value: String,
}

/// Source querying <https://crt.sh> for certificates issued under a domain
#[derive(Debug, Clone)]
pub struct CrtSh {
    config: SourceConfig,
    lock: SourceLock,
    endpoint: String,
}

impl CrtSh {
    #[must_use]
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            config: config.clone(),
            lock: SourceLock::new(config.max_concurrent_requests),
            endpoint: CRTSH_ENDPOINT.to_string(),
        }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

impl Default for CrtSh {
    fn default() -> Self {
        Self::new(&SourceConfig::default())
    }
}

/// Distinct subdomains named in a crt.sh JSON body, in first-seen order
///
/// The same name shows up on every renewed certificate, so repeats are
/// collapsed here rather than flooding the engine.
fn parse_certificates(body: &str, domain: &str) -> Result<Vec<String>, SourceError> {
    let entries: Vec<CertificateEntry> = serde_json::from_str(body)
        .map_err(|e| SourceError::Parse(format!("crt.sh returned invalid JSON: {e}")))?;

    let mut seen = HashSet::new();
    Ok(entries
        .iter()
        .flat_map(|entry| entry.name_value.split('\n'))
        .map(|name| name.trim().trim_start_matches("*.").to_lowercase())
        .filter(|name| is_strict_subdomain(name, domain))
        .filter(|name| seen.insert(name.clone()))
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
            tx.send(&ctx, SubdomainResult::failure(CRTSH_LABEL, e)).await;
            return;
        }
    };

    let query = format!("%.{domain}");
    let url = format!("{endpoint}/?q={}&output=json", urlencoding::encode(&query));
    let names = match fetch_text(&ctx, &config, &url)
        .await
        .and_then(|body| parse_certificates(&body, &domain))
    {
        Ok(names) => names,
        Err(e) => {
            tx.send(&ctx, SubdomainResult::failure(CRTSH_LABEL, e)).await;
            return;
        }
    };

    for name in names {
        if !tx.send(&ctx, SubdomainResult::success(CRTSH_LABEL, name)).await {
            return;
        }
    }
}

impl Source for CrtSh {
    fn label(&self) -> &'static str {
        CRTSH_LABEL
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
