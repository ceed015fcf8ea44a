use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, Sender};
use tokio_stream::wrappers::ReceiverStream;

use super::context::EnumContext;
use crate::enumeration::SubdomainResult;
use crate::utils::RESULT_CHANNEL_CAPACITY;

/// Producer half of a result stream.
///
/// Sources and engine invocations hold one of these; dropping the last clone
/// closes the paired [`ResultStream`].
#[derive(Clone)]
pub struct ResultSender {
    inner: Sender<SubdomainResult>,
}

impl ResultSender {
    /// Send a result, or give up as soon as the context is done.
    ///
    /// Returns `false` when the result was not delivered, either because the
    /// context finished first or because the reader dropped its stream. A
    /// producer seeing `false` must stop producing.
    pub async fn send(&self, ctx: &EnumContext, result: SubdomainResult) -> bool {
        if ctx.is_done() {
            return false;
        }
        tokio::select! {
            biased;
            () = ctx.done() => false,
            sent = self.inner.send(result) => sent.is_ok(),
        }
    }

    /// Returns true once the reader has dropped or closed its stream.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.inner.max_capacity()
    }
}

/// Consumer half: an async stream of results that ends once every sender is gone.
pub struct ResultStream {
    inner: ReceiverStream<SubdomainResult>,
}

impl ResultStream {
    /// Receive the next result, `None` once the stream has closed.
    #[inline]
    pub async fn recv(&mut self) -> Option<SubdomainResult> {
        futures::StreamExt::next(&mut self.inner).await
    }

    /// Stop accepting results; buffered ones can still be received.
    ///
    /// Producers observe a failed send and wind down.
    #[inline]
    pub fn close(&mut self) {
        self.inner.close();
    }

    /// Stream that is already closed.
    #[must_use]
    pub fn empty() -> Self {
        let (_, stream) = result_channel();
        stream
    }
}

impl Stream for ResultStream {
    type Item = SubdomainResult;

    #[inline]
    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Creates a result channel with the default buffer size.
#[inline]
#[must_use]
pub fn result_channel() -> (ResultSender, ResultStream) {
    result_channel_with_capacity(RESULT_CHANNEL_CAPACITY)
}

/// Creates a result channel holding at most `cap` undelivered results.
#[inline]
#[must_use]
pub fn result_channel_with_capacity(cap: usize) -> (ResultSender, ResultStream) {
    let (tx, rx) = mpsc::channel(cap.max(1));
    (
        ResultSender { inner: tx },
        ResultStream {
            inner: ReceiverStream::new(rx),
        },
    )
}

impl std::fmt::Debug for ResultSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultSender")
            .field("capacity", &self.capacity())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl std::fmt::Debug for ResultStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStream").finish_non_exhaustive()
    }
}
