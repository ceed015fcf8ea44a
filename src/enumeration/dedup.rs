//! Streaming de-duplication of enumeration output.
//!
//! The recursion guard only saves recursive work; this filter is what makes
//! the visible stream free of repeated discoveries, no matter how many
//! Sources or recursion branches found the same name.

use futures::Stream;
use futures::ready;
use std::collections::HashSet;
use std::pin::Pin;
use std::task::{Context, Poll};

use super::result_types::SubdomainResult;

/// Stream adapter forwarding only the first occurrence of each success value
///
/// Failures always pass through. Order of the input is preserved; the stream
/// ends when the input ends. Single reader, so the seen-set needs no lock.
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct UniqResults<S> {
    inner: S,
    seen: HashSet<String>,
    dropped: usize,
}

/// Wrap `results` so repeated success values are dropped
pub fn uniq_results<S>(results: S) -> UniqResults<S>
where
    S: Stream<Item = SubdomainResult> + Unpin,
{
    UniqResults {
        inner: results,
        seen: HashSet::new(),
        dropped: 0,
    }
}

impl<S> UniqResults<S> {
    /// Number of distinct success values forwarded so far
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    /// Number of duplicate successes suppressed so far
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }
}

impl<S> Stream for UniqResults<S>
where
    S: Stream<Item = SubdomainResult> + Unpin,
{
    type Item = SubdomainResult;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let Some(result) = ready!(Pin::new(&mut this.inner).poll_next(cx)) else {
                return Poll::Ready(None);
            };
            let first_seen = match result.value() {
                Some(value) => this.seen.insert(value.to_owned()),
                None => true,
            };
            if first_seen {
                return Poll::Ready(Some(result));
            }
            this.dropped += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.inner.size_hint().1)
    }
}

/// Extension methods for streams of results
pub trait ResultStreamExt: Stream<Item = SubdomainResult> + Sized {
    /// See [`uniq_results`]
    fn uniq(self) -> UniqResults<Self>
    where
        Self: Unpin,
    {
        uniq_results(self)
    }
}

impl<S: Stream<Item = SubdomainResult>> ResultStreamExt for S {}
