//! The capability every provider implements.

use std::fmt::Debug;
use std::sync::Arc;

use crate::runtime::{EnumContext, ResultStream};

/// A pluggable provider of candidate subdomains.
///
/// `process` must return immediately with an open stream and do all of its
/// work on a spawned task behind it. Implementations must:
///
/// - close the stream exactly once, after they stop producing (work
///   exhausted, unrecoverable error, or context done);
/// - race every emission against the context (see
///   [`ResultSender::send`](crate::runtime::ResultSender::send)) so an
///   abandoned stream never blocks them;
/// - report failures as failure results and then stop, never retrying on
///   the engine's behalf.
///
/// Any concurrency or rate ceiling is private state of the implementation.
pub trait Source: Send + Sync + Debug {
    /// Provenance label stamped on every result
    fn label(&self) -> &'static str;

    /// Start enumerating subdomains of `domain`
    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream;
}

/// Sources are shared between every invocation of one enumeration tree.
pub type SharedSource = Arc<dyn Source>;
