//! Process-wide HTTP client shared by every source
//!
//! Sources reuse one `reqwest::Client` so connections are pooled across
//! pages, providers and recursive invocations. Per-source settings (timeout,
//! user agent) are applied per request.

use log::warn;
use reqwest::{Client, StatusCode};
use reqwest::header::USER_AGENT;
use std::sync::OnceLock;
use std::time::Duration;

use crate::config::SourceConfig;
use crate::enumeration::SourceError;
use crate::runtime::EnumContext;
use crate::utils::{CHROME_USER_AGENT, DEFAULT_REQUEST_TIMEOUT_SECS};

static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or initialize the shared client
pub fn shared_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|e| {
                warn!(target: "subdomains::sources", "Falling back to default HTTP client: {e}");
                Client::new()
            })
    })
}

/// The error a source reports when it stops because the context is done
#[must_use]
pub fn context_error(ctx: &EnumContext) -> SourceError {
    ctx.err().map_or(SourceError::Cancelled, SourceError::from)
}

/// GET `url` and return the body, racing the whole exchange against `ctx`
///
/// # Errors
/// Transport errors, any status other than 200, or the context finishing first.
pub async fn fetch_text(
    ctx: &EnumContext,
    config: &SourceConfig,
    url: &str,
) -> Result<String, SourceError> {
    let request = shared_client()
        .get(url)
        .header(USER_AGENT, config.user_agent.as_str())
        .timeout(config.request_timeout());

    let exchange = async {
        let response = request.send().await?;
        let status = response.status();
        // Anything but 200 (including other 2xx) carries no usable page.
        if status != StatusCode::OK {
            return Err(SourceError::Status(status.to_string()));
        }
        Ok::<_, SourceError>(response.text().await?)
    };

    tokio::select! {
        biased;
        () = ctx.done() => Err(context_error(ctx)),
        body = exchange => body,
    }
}
