//! Cancellation context shared by an entire enumeration tree.
//!
//! One `EnumContext` governs a top-level call: the engine threads clones of
//! it, unmodified, into every Source and every recursive invocation. Clones
//! share the same cancellation token and deadline.

use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a context is done
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// `cancel()` was called on the context or one of its clones
    #[error("context canceled")]
    Cancelled,
    /// The deadline passed
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation token plus optional deadline
#[derive(Debug, Clone, Default)]
pub struct EnumContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl EnumContext {
    /// Context that is only done once cancelled
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context that expires `timeout` from now
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Context that expires at `deadline`
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Context that expires `timeout` from now and is also done once `self` is
    ///
    /// Cancelling the child leaves `self` untouched. The child's deadline
    /// never outlives the parent's.
    #[must_use]
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let own = Instant::now() + timeout;
        Self {
            token: self.token.child_token(),
            deadline: Some(self.deadline.map_or(own, |parent| parent.min(own))),
        }
    }

    /// Cancel this context and every clone of it
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether the context has been cancelled or has expired
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// The reason the context is done, `None` while it is still live
    ///
    /// Explicit cancellation wins over an expired deadline.
    #[must_use]
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes
    ///
    /// Cancel-safe; meant to be raced against other work in `tokio::select!`.
    pub async fn done(&self) {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = self.token.cancelled() => {}
                    () = tokio::time::sleep_until(deadline) => {}
                }
            }
            None => self.token.cancelled().await,
        }
    }
}
