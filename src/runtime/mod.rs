//! Async runtime primitives for enumeration
//!
//! This module provides the cancellation context threaded through every
//! producer and the result channels that carry their output.

pub mod channel;
pub mod context;

pub use channel::{ResultSender, ResultStream, result_channel, result_channel_with_capacity};
pub use context::{ContextError, EnumContext};
