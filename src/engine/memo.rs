//! A verdict cache for compatibility facts.

use std::{
    collections::HashMap,
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use serde::Serialize;

use crate::domain::CompatibilityKey;

/// Caches the verdict of every evaluated [`CompatibilityKey`].
///
/// The cache is unbounded. The number of distinct keys is bounded by the
/// catalog sizes, which is far smaller than the cross product that queries it.
///
/// A `Memo` may be shared between threads. Rules are never run while the lock
/// is held, so a rule may itself consult the cache. Two threads missing on
/// the same key may both run the rule; both store the same verdict.
#[derive(Debug, Default)]
pub struct Memo {
    entries: RwLock<HashMap<CompatibilityKey, bool>>,
    hits: AtomicU64,
    evaluations: AtomicU64,
}

impl Memo {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached verdict for `key`, running `rule` on a miss.
    pub fn evaluate(&self, key: CompatibilityKey, rule: impl FnOnce() -> bool) -> bool {
        if let Some(verdict) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return verdict;
        }

        let verdict = rule();
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *entries.entry(key).or_insert(verdict)
    }

    /// Returns the cached verdict without evaluating anything.
    #[must_use]
    pub fn get(&self, key: &CompatibilityKey) -> Option<bool> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    /// A snapshot of the cache counters.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        MemoStats {
            entries: self
                .entries
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
            hits: self.hits.load(Ordering::Relaxed),
            evaluations: self.evaluations.load(Ordering::Relaxed),
        }
    }
}

/// Cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemoStats {
    /// Distinct keys stored.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Rule invocations.
    pub evaluations: u64,
}
