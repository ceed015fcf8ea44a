//! Pull subdomains of a base domain out of arbitrary scraped text.
//!
//! Matching policy lives here, not in the engine:
//! - case-insensitive, results lowercased;
//! - at least one label in front of the base (the base is not its own subdomain);
//! - a match running into more hostname text (`a.example.com.evil.net`,
//!   `a.example.comx`) is a different name and is rejected;
//! - with several candidates in one chunk the longest wins.

use anyhow::{Context as _, Result};
use regex::Regex;

use crate::utils::is_hostname_char;

/// Compiled matcher for subdomains of one base domain
#[derive(Debug, Clone)]
pub struct SubdomainExtractor {
    base: String,
    pattern: Regex,
}

impl SubdomainExtractor {
    /// Compile a matcher for subdomains of `base`
    ///
    /// # Errors
    /// Returns an error if the generated pattern does not compile.
    pub fn new(base: &str) -> Result<Self> {
        let base = base.trim_end_matches('.').to_lowercase();
        let pattern = format!(
            r"(?i)(?:[a-z0-9_](?:[a-z0-9_-]*[a-z0-9_])?\.)+{}",
            regex::escape(&base)
        );
        let pattern = Regex::new(&pattern)
            .with_context(|| format!("Invalid subdomain pattern for '{base}'"))?;
        Ok(Self { base, pattern })
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Longest subdomain of the base found in `text`, lowercased
    #[must_use]
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .find_iter(text)
            .filter(|found| !runs_into_hostname(&text[found.end()..]))
            .map(|found| found.as_str())
            .max_by_key(|name| name.len())
            .map(str::to_lowercase)
    }
}

/// Whether the text right after a match continues the hostname
fn runs_into_hostname(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some('.') => chars.next().is_some_and(is_hostname_char),
        Some(c) => is_hostname_char(c),
        None => false,
    }
}
