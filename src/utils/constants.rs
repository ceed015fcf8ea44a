//! Shared configuration constants for subdomain enumeration
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Buffer size of every result channel (Source substreams and engine output)
///
/// Small on purpose: producers stay in lockstep with the consumer, so an
/// abandoned stream holds at most this many undelivered results per task.
pub const RESULT_CHANNEL_CAPACITY: usize = 16;

/// Default number of result pages requested by paginated search-engine sources
///
/// Search engines stop returning new hosts long before this, but some keep
/// answering with the same page, so the bound also caps wasted requests.
pub const DEFAULT_MAX_PAGES: usize = 750;

/// Default timeout for a single provider HTTP request: 30 seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default number of in-flight requests a single source may have
///
/// Every source serializes its own work by default, so recursive enumeration
/// fans out across providers rather than hammering one of them.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 1;

/// Default pause between two page requests of a paginated source
pub const DEFAULT_PAGE_DELAY_MS: u64 = 0;

/// Default overall run time for the command-line front end: 60 seconds
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 60;

/// Label used for results produced by the engine itself
pub const ENGINE_LABEL: &str = "engine";

/// Chrome user agent string sent by the shared HTTP client
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Search engines serve stripped or captcha pages to unknown agents.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
