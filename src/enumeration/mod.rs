//! Enumeration Engine Module
//!
//! This module contains the core of subdomain discovery: the result and
//! Source contracts, the fan-out/fan-in engine with its recursion
//! controller, and the output de-duplication filter.

// Sub-modules
pub mod dedup;
pub mod engine;
pub mod errors;
pub mod recursion_guard;
pub mod result_types;
pub mod source;

// Re-exports for public API
pub use dedup::{ResultStreamExt, UniqResults, uniq_results};
pub use engine::enumerate_subdomains;
pub use errors::SourceError;
pub use recursion_guard::RecursionGuard;
pub use result_types::SubdomainResult;
pub use source::{SharedSource, Source};
