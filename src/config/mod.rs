//! Configuration module for subdomain enumeration
//!
//! This module provides the `EnumerationOptions` struct and its type-safe
//! builder, plus `SourceConfig` for the bundled providers.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::{EnumerationOptionsBuilder, WithSources};
pub use types::{EnumerationOptions, SourceConfig};
