//! Cooldown Map Module
//!
//! Per-key rate limiting with self-expiring entries. Each active cooldown
//! schedules a one-shot removal timer; entries are also lazily removed when
//! checked after expiry, so the map is correct without a runtime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::trace;

// == Cooldown Map ==
/// Maps string keys to cooldown expiry instants.
///
/// `keys()` and `len()` are raw snapshots: a key whose removal timer has not
/// fired yet may still appear briefly after its expiry. The expiry-aware
/// operations (`set_cooldown`, `has_cooldown`, `remaining`) never treat such
/// an entry as active.
#[derive(Debug, Default)]
pub struct CooldownMap {
    /// Shared with removal timers
    entries: Arc<Mutex<HashMap<String, Instant>>>,
}

impl CooldownMap {
    // == Constructor ==
    /// Creates an empty cooldown map.
    pub fn new() -> Self {
        Self::default()
    }

    // == Set Cooldown ==
    /// Starts a cooldown of `duration` for `key`.
    ///
    /// Returns `false` without effect if the key is already under an active
    /// cooldown. When a tokio runtime is current, a one-shot timer removes
    /// the entry once the cooldown elapses; otherwise removal is lazy.
    pub fn set_cooldown(&self, key: impl Into<String>, duration: Duration) -> bool {
        let key = key.into();
        let now = Instant::now();
        let expires_at = now + duration;

        {
            let mut entries = self.lock();
            if let Some(&existing) = entries.get(&key) {
                if now < existing {
                    return false;
                }
            }
            entries.insert(key.clone(), expires_at);
        }

        if tokio::runtime::Handle::try_current().is_ok() {
            let entries = Arc::clone(&self.entries);
            let timer_key = key.clone();
            tokio::spawn(async move {
                tokio::time::sleep(duration).await;
                let mut entries = entries.lock().unwrap_or_else(PoisonError::into_inner);
                // Only remove what this timer armed: a key reset and re-armed
                // since scheduling has a later expiry and is left alone.
                if let Some(&current) = entries.get(&timer_key) {
                    if Instant::now() >= current {
                        entries.remove(&timer_key);
                        trace!("Cooldown for '{}' expired", timer_key);
                    }
                }
            });
        }

        trace!("Cooldown set for '{}' ({:?})", key, duration);
        true
    }

    // == Has Cooldown ==
    /// Returns whether `key` is under an active cooldown. A stale entry is
    /// removed as a side effect and reads as inactive.
    pub fn has_cooldown(&self, key: &str) -> bool {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(&expires_at) if Instant::now() < expires_at => true,
            Some(_) => {
                entries.remove(key);
                false
            }
            None => false,
        }
    }

    // == Remaining ==
    /// Time left on the cooldown for `key`; zero if none is active.
    pub fn remaining(&self, key: &str) -> Duration {
        self.lock()
            .get(key)
            .map(|expires_at| expires_at.saturating_duration_since(Instant::now()))
            .unwrap_or(Duration::ZERO)
    }

    // == Reset ==
    /// Removes the cooldown for `key` unconditionally; returns whether one
    /// was present. An already-scheduled removal timer is left running and
    /// fires as a no-op.
    pub fn reset(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    // == Clear ==
    /// Removes all entries. Pending timers fire as no-ops.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // == Raw Accessors ==
    /// Snapshot of current keys; eventually consistent, not expiry-filtered.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Number of entries currently held; eventually consistent.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the map holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // No user code runs under this lock, so poisoning only follows an
    // internal panic; recover rather than cascade.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
