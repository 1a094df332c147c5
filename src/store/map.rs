//! State Map Module
//!
//! Synchronous mutation engine for the state store: HashMap storage combined
//! with recency tracking, TTL expiry, and LRU eviction. Removal hooks are the
//! handle's business — every removing operation hands the removed pairs back
//! to the caller so hooks can run outside any lock.

use std::collections::HashMap;
use std::time::Duration;

use crate::store::{RecencyList, StateEntry, StoreStats};

// == Read Outcome ==
/// Result of an expiry-aware read.
#[derive(Debug)]
pub(crate) enum ReadOutcome<T> {
    /// Entry present and live; carries the value (cloned for `get`)
    Hit(T),
    /// No entry under this key
    Miss,
    /// Entry was present but past its TTL; it has been removed and its
    /// value is handed back for the removal hook
    Expired(T),
}

// == State Map ==
/// Bounded, TTL-aware key-value mapping with LRU eviction.
#[derive(Debug)]
pub(crate) struct StateMap<T> {
    /// Key-value storage
    entries: HashMap<String, StateEntry<T>>,
    /// Access-order tracker for eviction
    recency: RecencyList,
    /// Activity counters
    stats: StoreStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// TTL applied when an insert carries no override
    default_ttl: Duration,
}

impl<T> StateMap<T> {
    // == Constructor ==
    pub(crate) fn new(max_size: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            recency: RecencyList::new(),
            stats: StoreStats::new(),
            max_size,
            default_ttl,
        }
    }

    // == Insert ==
    /// Inserts or overwrites `key`, evicting the least-recently-used entry
    /// first when the key is new and the map is at capacity.
    ///
    /// Returns the evicted pair, if any. Overwriting an existing key never
    /// evicts another key.
    pub(crate) fn insert(
        &mut self,
        key: String,
        value: T,
        ttl: Option<Duration>,
    ) -> Option<(String, T)> {
        let is_overwrite = self.entries.contains_key(&key);

        let mut evicted = None;
        if !is_overwrite && self.entries.len() >= self.max_size {
            if let Some(lru_key) = self.recency.pop_lru() {
                if let Some(entry) = self.entries.remove(&lru_key) {
                    self.stats.record_eviction();
                    evicted = Some((lru_key, entry.data));
                }
            }
        }

        let effective_ttl = ttl.unwrap_or(self.default_ttl);
        self.entries
            .insert(key.clone(), StateEntry::new(value, effective_ttl));
        self.recency.touch(&key);

        evicted
    }

    // == Read ==
    /// Expiry-aware lookup.
    ///
    /// A live hit refreshes the entry's access time and recency when `touch`
    /// is set (the `get` path); `has` reads without refreshing. An expired
    /// entry is removed and its value handed back.
    pub(crate) fn read(&mut self, key: &str, touch: bool) -> ReadOutcome<T>
    where
        T: Clone,
    {
        let expired = match self.entries.get(key) {
            None => {
                if touch {
                    self.stats.record_miss();
                }
                return ReadOutcome::Miss;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            if let Some(entry) = self.entries.remove(key) {
                self.recency.forget(key);
                self.stats.record_expiration();
                if touch {
                    self.stats.record_miss();
                }
                return ReadOutcome::Expired(entry.data);
            }
            return ReadOutcome::Miss;
        }

        let Some(entry) = self.entries.get_mut(key) else {
            return ReadOutcome::Miss;
        };
        let value = entry.data.clone();
        if touch {
            entry.touch();
            self.stats.record_hit();
            self.recency.touch(key);
        }
        ReadOutcome::Hit(value)
    }

    // == Remove ==
    /// Removes `key` unconditionally; returns its value if it was present.
    pub(crate) fn remove(&mut self, key: &str) -> Option<T> {
        let entry = self.entries.remove(key)?;
        self.recency.forget(key);
        Some(entry.data)
    }

    // == Drain ==
    /// Empties the map, returning every pair it held.
    pub(crate) fn drain_all(&mut self) -> Vec<(String, T)> {
        self.recency.clear();
        self.entries
            .drain()
            .map(|(key, entry)| (key, entry.data))
            .collect()
    }

    // == Sweep ==
    /// Removes every entry past its TTL, returning the removed pairs.
    pub(crate) fn sweep_expired(&mut self) -> Vec<(String, T)> {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let mut removed = Vec::with_capacity(expired_keys.len());
        for key in expired_keys {
            if let Some(entry) = self.entries.remove(&key) {
                self.recency.forget(&key);
                self.stats.record_expiration();
                removed.push((key, entry.data));
            }
        }
        removed
    }

    // == Raw Accessors ==
    // These reflect current contents as-is: no expiry checks, no access bump.

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub(crate) fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.entries.values().map(|e| e.data.clone()).collect()
    }

    pub(crate) fn snapshot(&self) -> Vec<(String, T)>
    where
        T: Clone,
    {
        self.entries
            .iter()
            .map(|(k, e)| (k.clone(), e.data.clone()))
            .collect()
    }

    // == Stats ==
    pub(crate) fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.entries.len());
        stats
    }
}
