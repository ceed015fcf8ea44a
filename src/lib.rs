pub mod config;
pub mod enumeration;
pub mod runtime;
pub mod sources;
pub mod utils;

pub use config::{EnumerationOptions, SourceConfig};
pub use enumeration::{
    RecursionGuard, ResultStreamExt, SharedSource, Source, SourceError, SubdomainResult,
    UniqResults, enumerate_subdomains, uniq_results,
};
pub use runtime::{ContextError, EnumContext, ResultSender, ResultStream, result_channel};
pub use sources::{SOURCE_NAMES, SubdomainExtractor, all_sources, source_by_name};
pub use utils::normalize_domain;

