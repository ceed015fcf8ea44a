//! Fake sources and helpers shared by the integration tests

#![allow(dead_code)]

use dashmap::DashMap;
use futures::StreamExt;
use kodegen_tools_subdomains::{
    EnumContext, ResultStream, Source, SourceError, SubdomainResult, result_channel,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Counts `process` calls per `(label, domain)`
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<DashMap<(&'static str, String), usize>>);

impl CallLog {
    pub fn record(&self, label: &'static str, domain: &str) {
        *self.0.entry((label, domain.to_string())).or_insert(0) += 1;
    }

    pub fn count(&self, label: &'static str, domain: &str) -> usize {
        self.0
            .get(&(label, domain.to_string()))
            .map_or(0, |count| *count)
    }

    /// Distinct `(label, domain)` pairs seen
    pub fn distinct(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|entry| *entry.value()).sum()
    }
}

/// Emits `<prefix>.<domain>` for each prefix, optionally pausing before each
#[derive(Debug, Clone)]
pub struct PrefixSource {
    pub label: &'static str,
    pub prefixes: &'static [&'static str],
    pub delay: Duration,
    pub calls: CallLog,
}

impl PrefixSource {
    pub fn new(label: &'static str, prefixes: &'static [&'static str]) -> Self {
        Self {
            label,
            prefixes,
            delay: Duration::ZERO,
            calls: CallLog::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Record calls into a log shared with the test
    pub fn with_calls(mut self, calls: CallLog) -> Self {
        self.calls = calls;
        self
    }
}

impl Source for PrefixSource {
    fn label(&self) -> &'static str {
        self.label
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        self.calls.record(self.label, &domain);
        let (tx, stream) = result_channel();
        let (label, prefixes, delay) = (self.label, self.prefixes, self.delay);
        tokio::spawn(async move {
            for prefix in prefixes {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let result = SubdomainResult::success(label, format!("{prefix}.{domain}"));
                if !tx.send(&ctx, result).await {
                    return;
                }
            }
        });
        stream
    }
}

/// Emits the same absolute names whatever domain it is asked about
#[derive(Debug, Clone)]
pub struct FixedSource {
    pub label: &'static str,
    pub names: &'static [&'static str],
    pub calls: CallLog,
}

impl FixedSource {
    pub fn new(label: &'static str, names: &'static [&'static str], calls: CallLog) -> Self {
        Self {
            label,
            names,
            calls,
        }
    }
}

impl Source for FixedSource {
    fn label(&self) -> &'static str {
        self.label
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        self.calls.record(self.label, &domain);
        let (tx, stream) = result_channel();
        let (label, names) = (self.label, self.names);
        tokio::spawn(async move {
            for name in names {
                if !tx.send(&ctx, SubdomainResult::success(label, *name)).await {
                    return;
                }
            }
        });
        stream
    }
}

/// Reports one provider failure and closes
#[derive(Debug, Clone, Copy)]
pub struct FailingSource;

impl Source for FailingSource {
    fn label(&self) -> &'static str {
        "failing"
    }

    fn process(&self, ctx: EnumContext, _domain: String) -> ResultStream {
        let (tx, stream) = result_channel();
        tokio::spawn(async move {
            let error = SourceError::Status("503 Service Unavailable".to_string());
            tx.send(&ctx, SubdomainResult::failure("failing", error)).await;
        });
        stream
    }
}

/// Emits `n<i>.<domain>` every millisecond until it can no longer deliver
#[derive(Debug, Clone, Default)]
pub struct EndlessSource {
    pub emitted: Arc<AtomicUsize>,
    pub finished: Arc<AtomicBool>,
}

impl EndlessSource {
    pub fn emitted(&self) -> usize {
        self.emitted.load(Ordering::SeqCst)
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl Source for EndlessSource {
    fn label(&self) -> &'static str {
        "endless"
    }

    fn process(&self, ctx: EnumContext, domain: String) -> ResultStream {
        let (tx, stream) = result_channel();
        let emitted = Arc::clone(&self.emitted);
        let finished = Arc::clone(&self.finished);
        tokio::spawn(async move {
            for i in 0usize.. {
                tokio::time::sleep(Duration::from_millis(1)).await;
                let result = SubdomainResult::success("endless", format!("n{i}.{domain}"));
                if !tx.send(&ctx, result).await {
                    break;
                }
                emitted.fetch_add(1, Ordering::SeqCst);
            }
            finished.store(true, Ordering::SeqCst);
        });
        stream
    }
}

/// Success values of a finished stream, in arrival order
pub async fn collect_values<S>(stream: S) -> Vec<String>
where
    S: futures::Stream<Item = SubdomainResult>,
{
    stream
        .filter_map(|result| async move { result.into_outcome().ok() })
        .collect()
        .await
}
