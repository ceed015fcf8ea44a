//! Error types carried by failure results
//!
//! Provider failures are data, not control flow: a Source wraps whatever went
//! wrong in a [`SourceError`], emits it as a failure result and closes.

use thiserror::Error;

use crate::runtime::ContextError;

/// Why a unit of discovery work failed
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure talking to the provider
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("unexpected response status: {0}")]
    Status(String),

    /// Provider answered with something we could not read
    #[error("malformed response: {0}")]
    Parse(String),

    /// The enumeration context was cancelled
    #[error("context canceled")]
    Cancelled,

    /// The enumeration context ran past its deadline
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// Enumeration was requested for an empty domain
    #[error("domain must not be empty")]
    EmptyDomain,

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    /// Whether this failure only reflects the context finishing
    #[must_use]
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}

impl From<ContextError> for SourceError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => Self::Cancelled,
            ContextError::DeadlineExceeded => Self::DeadlineExceeded,
        }
    }
}

impl From<anyhow::Error> for SourceError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Other(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_errors_map_to_cancellation() {
        assert!(SourceError::from(ContextError::Cancelled).is_cancellation());
        assert!(SourceError::from(ContextError::DeadlineExceeded).is_cancellation());
        assert!(!SourceError::Status("503".to_string()).is_cancellation());
    }

    #[test]
    fn test_anyhow_chain_is_kept() {
        let err = anyhow::anyhow!("root cause").context("while parsing");
        assert_eq!(
            SourceError::from(err).to_string(),
            "while parsing: root cause"
        );
    }
}
