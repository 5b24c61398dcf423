//! Cache Statistics Module
//!
//! Tracks cache performance metrics: hits, misses, and invalidations.
//! Counters are atomic because the cache handle is cloned across request
//! handlers without an outer lock.

use std::sync::atomic::{AtomicU64, Ordering};

// == Cache Stats ==
/// Shared cache performance counters.
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of reads served from the cache
    hits: AtomicU64,
    /// Number of reads that fell through to the durable store
    misses: AtomicU64,
    /// Number of invalidations issued by mutating operations
    invalidations: AtomicU64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Recorders ==
    /// Increments the hit counter.
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the miss counter.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Increments the invalidation counter.
    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    // == Readers ==
    /// Returns the number of cache hits recorded so far.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns the number of cache misses recorded so far.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the number of invalidations recorded so far.
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}
