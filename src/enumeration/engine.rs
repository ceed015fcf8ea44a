//! Fan-out/fan-in enumeration engine
//!
//! Every invocation (the top-level call and each recursive one) runs on its
//! own task and owns a join scope: a `SelectAll` over the substreams it
//! spawned, i.e. one per Source plus one per recursive child. Its output
//! sender is dropped, closing the output, only when that scope is exhausted
//! or the context is done. Parents poll their children's streams, so a tree
//! closes bottom-up without any global registry of tasks.
//!
//! Cancellation is cooperative: every emission races the shared context.
//! When an invocation stops early it drops its scope, which closes the
//! receivers its Sources and children are sending into, so they wind down
//! even if the caller never cancels.

use futures::stream::{SelectAll, Stream, StreamExt};
use log::{debug, trace};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use super::errors::SourceError;
use super::recursion_guard::RecursionGuard;
use super::result_types::SubdomainResult;
use crate::config::EnumerationOptions;
use crate::runtime::{EnumContext, ResultSender, ResultStream, result_channel};
use crate::utils::ENGINE_LABEL;

/// Where a substream of an invocation comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// A Source queried for this invocation's domain
    Source,
    /// A recursive invocation for one of this invocation's discoveries
    Child,
}

/// One member of an invocation's join scope
struct Substream {
    origin: Origin,
    stream: ResultStream,
}

impl Stream for Substream {
    type Item = (Origin, SubdomainResult);

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let origin = self.origin;
        Pin::new(&mut self.stream)
            .poll_next(cx)
            .map(|next| next.map(|result| (origin, result)))
    }
}

/// State shared by every invocation of one top-level call
#[derive(Debug)]
struct EnumerationTree {
    options: Arc<EnumerationOptions>,
    guard: Option<RecursionGuard>,
}

impl EnumerationTree {
    /// Decide whether a discovered name gets its own invocation
    fn should_recurse(&self, name: &str) -> bool {
        if !self.options.recursive() || name.is_empty() {
            return false;
        }
        match &self.guard {
            Some(guard) if !guard.try_claim(name) => {
                trace!(target: "subdomains::engine", "recursion into {name} already dispatched");
                false
            }
            _ => true,
        }
    }
}

/// Enumerate subdomains of `domain` across every configured Source.
///
/// Returns immediately; all work happens on spawned tasks. The stream yields
/// results from all Sources interleaved (order is only preserved within one
/// Source) and, when `options.recursive()` is set, from recursive
/// enumerations of every discovered name. It closes once every producer of
/// the tree has finished, or promptly after `ctx` is done.
///
/// Recursion has no depth limit: with `recursive` set, `ctx` (its deadline
/// or an explicit cancel) is what bounds the run.
///
/// With `uniq` set, `domain` itself counts as already dispatched: a Source
/// echoing it back never triggers a recursive run on the seed.
///
/// Must be called from within a tokio runtime.
pub fn enumerate_subdomains(
    ctx: EnumContext,
    domain: impl Into<String>,
    options: impl Into<Arc<EnumerationOptions>>,
) -> ResultStream {
    let domain = domain.into();
    let options = options.into();

    let guard = options.uniq().then(|| {
        let guard = RecursionGuard::new();
        guard.try_claim(&domain);
        guard
    });
    let tree = Arc::new(EnumerationTree { options, guard });

    spawn_invocation(tree, ctx, domain)
}

fn spawn_invocation(tree: Arc<EnumerationTree>, ctx: EnumContext, domain: String) -> ResultStream {
    let (tx, stream) = result_channel();
    tokio::spawn(run_invocation(tree, ctx, domain, tx));
    stream
}

async fn run_invocation(
    tree: Arc<EnumerationTree>,
    ctx: EnumContext,
    domain: String,
    tx: ResultSender,
) {
    if domain.is_empty() {
        tx.send(
            &ctx,
            SubdomainResult::failure(ENGINE_LABEL, SourceError::EmptyDomain),
        )
        .await;
        return;
    }

    let mut scope: SelectAll<Substream> = tree
        .options
        .sources()
        .iter()
        .map(|source| Substream {
            origin: Origin::Source,
            stream: source.process(ctx.clone(), domain.clone()),
        })
        .collect();

    debug!(
        target: "subdomains::engine",
        "Enumerating {domain} across {} sources",
        scope.len()
    );

    let mut forwarded = 0usize;
    let mut children = 0usize;

    loop {
        let next = tokio::select! {
            biased;
            () = ctx.done() => {
                debug!(target: "subdomains::engine", "Context done while enumerating {domain}");
                break;
            }
            next = scope.next() => next,
        };
        let Some((origin, result)) = next else {
            break;
        };

        // Children recurse into their own discoveries; only direct Source
        // results are candidates here.
        if origin == Origin::Source
            && let Some(name) = result.value()
            && tree.should_recurse(name)
        {
            trace!(target: "subdomains::engine", "Recursing into {name}");
            scope.push(Substream {
                origin: Origin::Child,
                stream: spawn_invocation(Arc::clone(&tree), ctx.clone(), name.to_string()),
            });
            children += 1;
        }

        if !tx.send(&ctx, result).await {
            debug!(target: "subdomains::engine", "Output of {domain} abandoned");
            break;
        }
        forwarded += 1;
    }

    debug!(
        target: "subdomains::engine",
        "Finished {domain}: {forwarded} results forwarded, {children} recursive invocations"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumeration::Source;

    #[derive(Debug)]
    struct Fixed(&'static [&'static str]);

    impl Source for Fixed {
        fn label(&self) -> &'static str {
            "fixed"
        }

        fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
            let (tx, stream) = result_channel();
            let prefixes = self.0;
            tokio::spawn(async move {
                for prefix in prefixes {
                    let result = SubdomainResult::success("fixed", format!("{prefix}.{domain}"));
                    if !tx.send(&ctx, result).await {
                        return;
                    }
                }
            });
            stream
        }
    }

    /// Echoes the queried domain and always reports the same host
    #[derive(Debug)]
    struct Echo;

    impl Source for Echo {
        fn label(&self) -> &'static str {
            "echo"
        }

        fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
            let (tx, stream) = result_channel();
            tokio::spawn(async move {
                for name in [domain, "www.example.com".to_string()] {
                    if !tx.send(&ctx, SubdomainResult::success("echo", name)).await {
                        return;
                    }
                }
            });
            stream
        }
    }

    #[test]
    fn test_should_recurse_respects_options() {
        let plain = EnumerationTree {
            options: Arc::new(EnumerationOptions::new(Vec::new())),
            guard: None,
        };
        assert!(!plain.should_recurse("a.example.com"));

        let recursive = EnumerationTree {
            options: Arc::new(EnumerationOptions {
                sources: Vec::new(),
                recursive: true,
                uniq: false,
            }),
            guard: None,
        };
        assert!(recursive.should_recurse("a.example.com"));
        assert!(recursive.should_recurse("a.example.com"));
        assert!(!recursive.should_recurse(""));

        let guarded = EnumerationTree {
            options: Arc::new(EnumerationOptions {
                sources: Vec::new(),
                recursive: true,
                uniq: true,
            }),
            guard: Some(RecursionGuard::new()),
        };
        assert!(guarded.should_recurse("a.example.com"));
        assert!(!guarded.should_recurse("a.example.com"));
    }

    #[tokio::test]
    async fn test_single_source_order_is_preserved() {
        let options = EnumerationOptions::builder()
            .source(Fixed(&["a", "b", "c", "d"]))
            .build();
        let values: Vec<String> = enumerate_subdomains(EnumContext::new(), "example.com", options)
            .filter_map(|result| async move { result.into_outcome().ok() })
            .collect()
            .await;

        assert_eq!(
            values,
            vec!["a.example.com", "b.example.com", "c.example.com", "d.example.com"]
        );
    }

    #[tokio::test]
    async fn test_seed_domain_is_never_recursed_with_uniq() {
        let options = EnumerationOptions::builder()
            .source(Echo)
            .recursive(true)
            .uniq(true)
            .build();
        let values: Vec<String> = enumerate_subdomains(EnumContext::new(), "example.com", options)
            .filter_map(|result| async move { result.into_outcome().ok() })
            .collect()
            .await;

        // Root: example.com (seed, not recursed) + www.example.com (recursed once).
        // Child: www.example.com twice, both already claimed. The tree then exhausts.
        let seed_hits = values.iter().filter(|value| *value == "example.com").count();
        assert_eq!(seed_hits, 1);
        assert_eq!(values.len(), 4);
    }
}
