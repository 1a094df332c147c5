//! Store Statistics Module
//!
//! Tracks store activity: hits, misses, evictions, and expirations.

use serde::Serialize;

// == Store Stats ==
/// Activity counters for a state store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    /// Successful reads of unexpired entries
    pub hits: u64,
    /// Reads of missing or expired entries
    pub misses: u64,
    /// Entries removed by LRU capacity eviction
    pub evictions: u64,
    /// Entries removed because their TTL elapsed (lazy or swept)
    pub expirations: u64,
    /// Current number of entries, including not-yet-swept expired ones
    pub entries: usize,
}

impl StoreStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fraction of reads that hit, or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn set_entries(&mut self, count: usize) {
        self.entries = count;
    }
}
