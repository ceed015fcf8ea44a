//! Shared seen-set that keeps recursion from re-entering a domain.

use dashmap::DashSet;

/// Domains already dispatched into recursion for one top-level call
///
/// Entries are never removed. This only suppresses redundant recursive work;
/// it never hides a result from the output stream.
#[derive(Debug, Default)]
pub struct RecursionGuard {
    dispatched: DashSet<String>,
}

impl RecursionGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `domain` for recursion
    ///
    /// Single atomic test-and-insert: exactly one of any number of racing
    /// callers for the same name gets `true`.
    pub fn try_claim(&self, domain: &str) -> bool {
        self.dispatched.insert(domain.to_string())
    }

    #[must_use]
    pub fn contains(&self, domain: &str) -> bool {
        self.dispatched.contains(domain)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dispatched.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dispatched.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_claim_once() {
        let guard = RecursionGuard::new();
        assert!(guard.is_empty());
        assert!(guard.try_claim("a.example.com"));
        assert!(!guard.try_claim("a.example.com"));
        assert!(guard.try_claim("b.example.com"));
        assert_eq!(guard.len(), 2);
        assert!(guard.contains("a.example.com"));
        assert!(!guard.contains("c.example.com"));
    }

    #[test]
    fn test_racing_claims_have_one_winner() {
        let guard = Arc::new(RecursionGuard::new());
        let winners = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let guard = Arc::clone(&guard);
                let winners = Arc::clone(&winners);
                std::thread::spawn(move || {
                    if guard.try_claim("race.example.com") {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("claim thread panicked");
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }
}
