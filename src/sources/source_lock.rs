//! Per-source concurrency ceiling
//!
//! Each source owns one of these to cap its in-flight work, so recursive
//! enumeration fanning out hundreds of invocations still hits every provider
//! with a bounded number of requests. The engine never sees it.

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use super::http_client::context_error;
use crate::enumeration::SourceError;
use crate::runtime::EnumContext;

/// Cloneable semaphore handle; clones share the same permits
#[derive(Debug, Clone)]
pub struct SourceLock {
    semaphore: Arc<Semaphore>,
    max_permits: usize,
}

impl SourceLock {
    /// Create a lock admitting `max_permits` holders at once (at least one)
    #[must_use]
    pub fn new(max_permits: usize) -> Self {
        let max_permits = max_permits.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(max_permits)),
            max_permits,
        }
    }

    /// Wait for a permit, or give up once the context is done
    ///
    /// The permit is released when dropped.
    ///
    /// # Errors
    /// The context's error if it finishes before a permit frees up.
    pub async fn acquire(&self, ctx: &EnumContext) -> Result<OwnedSemaphorePermit, SourceError> {
        if ctx.is_done() {
            return Err(context_error(ctx));
        }
        tokio::select! {
            biased;
            () = ctx.done() => Err(context_error(ctx)),
            permit = Arc::clone(&self.semaphore).acquire_owned() => {
                // Only fails if the semaphore is closed, which this type never does.
                permit.map_err(|e| SourceError::Other(format!("source lock closed: {e}")))
            }
        }
    }

    /// Permits currently free
    #[must_use]
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    #[must_use]
    pub fn max_permits(&self) -> usize {
        self.max_permits
    }
}

impl Default for SourceLock {
    fn default() -> Self {
        Self::new(crate::utils::DEFAULT_MAX_CONCURRENT_REQUESTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_permits_are_at_least_one() {
        assert_eq!(SourceLock::new(0).max_permits(), 1);
        let lock = SourceLock::new(3);
        assert_eq!(lock.max_permits(), 3);
        assert_eq!(lock.available(), 3);
        assert_eq!(SourceLock::default().max_permits(), 1);
    }

    #[tokio::test]
    async fn test_second_holder_waits_until_release() {
        let lock = SourceLock::new(1);
        let ctx = EnumContext::new();

        let permit = lock.acquire(&ctx).await.unwrap();
        assert_eq!(lock.available(), 0);

        let waiter = tokio::spawn({
            let lock = lock.clone();
            let ctx = ctx.clone();
            async move { lock.acquire(&ctx).await.is_ok() }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        drop(permit);
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_acquire_gives_up_on_cancel() {
        let lock = SourceLock::new(1);
        let ctx = EnumContext::new();
        let _held = lock.acquire(&ctx).await.unwrap();

        let waiter = tokio::spawn({
            let lock = lock.clone();
            let ctx = ctx.clone();
            async move { lock.acquire(&ctx).await }
        });
        ctx.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("acquire should observe cancellation")
            .unwrap();
        assert!(matches!(result, Err(SourceError::Cancelled)));
    }
}
