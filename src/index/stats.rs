use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::Serialize;

/// Snapshot of B-tree operation counters at a point in time.
#[derive(Default, Debug, Clone, Copy, Serialize)]
pub struct BTreeStatsSnapshot {
    /// Number of searches performed
    pub searches: u64,
    /// Number of nodes visited across all searches
    pub search_visits: u64,
    /// Number of keys inserted
    pub inserts: u64,
    /// Number of leaf node splits performed
    pub leaf_splits: u64,
    /// Number of internal node splits performed
    pub internal_splits: u64,
    /// Number of root splits (each one grows the tree by a level)
    pub root_splits: u64,
}

/// Thread-safe statistics tracking for B-tree operations.
#[derive(Default, Debug)]
pub struct BTreeStats {
    searches: AtomicU64,
    search_visits: AtomicU64,
    inserts: AtomicU64,
    leaf_splits: AtomicU64,
    internal_splits: AtomicU64,
    root_splits: AtomicU64,
}

impl BTreeStats {
    /// Returns the current count of searches.
    pub fn searches(&self) -> u64 {
        self.searches.load(AtomicOrdering::Relaxed)
    }

    /// Returns the total number of nodes visited across all searches.
    pub fn search_visits(&self) -> u64 {
        self.search_visits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the current count of insertions.
    pub fn inserts(&self) -> u64 {
        self.inserts.load(AtomicOrdering::Relaxed)
    }

    /// Returns the current count of leaf splits.
    pub fn leaf_splits(&self) -> u64 {
        self.leaf_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the current count of internal node splits.
    pub fn internal_splits(&self) -> u64 {
        self.internal_splits.load(AtomicOrdering::Relaxed)
    }

    /// Returns the current count of root splits.
    pub fn root_splits(&self) -> u64 {
        self.root_splits.load(AtomicOrdering::Relaxed)
    }

    pub(super) fn record_search(&self, visits: u64) {
        self.searches.fetch_add(1, AtomicOrdering::Relaxed);
        self.search_visits.fetch_add(visits, AtomicOrdering::Relaxed);
    }

    pub(super) fn record_insert(&self) {
        self.inserts.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(super) fn record_leaf_split(&self) {
        self.leaf_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(super) fn record_internal_split(&self) {
        self.internal_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    pub(super) fn record_root_split(&self) {
        self.root_splits.fetch_add(1, AtomicOrdering::Relaxed);
    }

    /// Capture a consistent snapshot of all counters.
    pub fn snapshot(&self) -> BTreeStatsSnapshot {
        BTreeStatsSnapshot {
            searches: self.searches(),
            search_visits: self.search_visits(),
            inserts: self.inserts(),
            leaf_splits: self.leaf_splits(),
            internal_splits: self.internal_splits(),
            root_splits: self.root_splits(),
        }
    }

    /// Emit the current counters as a single structured log event.
    pub fn log_summary(&self) {
        let snap = self.snapshot();
        tracing::info!(
            searches = snap.searches,
            search_visits = snap.search_visits,
            inserts = snap.inserts,
            leaf_splits = snap.leaf_splits,
            internal_splits = snap.internal_splits,
            root_splits = snap.root_splits,
            "index.stats.summary"
        );
    }
}
