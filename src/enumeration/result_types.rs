//! The streamed unit of discovery.

use std::fmt;

use super::errors::SourceError;

/// One outcome produced by a Source (or by the engine itself).
///
/// Either a discovered name or a failure, never both and never neither: the
/// outcome is a plain `Result`. `label` records which Source produced it.
/// Results are immutable once built and consumed exactly once downstream.
#[derive(Debug)]
pub struct SubdomainResult {
    label: &'static str,
    outcome: Result<String, SourceError>,
}

impl SubdomainResult {
    /// A discovered name
    #[must_use]
    pub fn success(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            outcome: Ok(value.into()),
        }
    }

    /// A failure of the producing Source
    #[must_use]
    pub fn failure(label: &'static str, error: impl Into<SourceError>) -> Self {
        Self {
            label,
            outcome: Err(error.into()),
        }
    }

    /// Name of the Source that produced this result
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// The discovered name, `None` for failures
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    /// The failure cause, `None` for successes
    #[inline]
    #[must_use]
    pub fn error(&self) -> Option<&SourceError> {
        self.outcome.as_ref().err()
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    #[inline]
    #[must_use]
    pub fn outcome(&self) -> &Result<String, SourceError> {
        &self.outcome
    }

    #[must_use]
    pub fn into_outcome(self) -> Result<String, SourceError> {
        self.outcome
    }
}

impl fmt::Display for SubdomainResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Ok(value) => write!(f, "{}: {value}", self.label),
            Err(err) => write!(f, "{}: error: {err}", self.label),
        }
    }
}
