//! State Store Module
//!
//! Public handle over the state map engine: locking, removal-hook dispatch,
//! background sweep ownership, and teardown.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, StateError};
use crate::store::map::{ReadOutcome, StateMap};
use crate::store::StoreStats;
use crate::tasks::spawn_sweep_task;

/// Removal hook in shared form, callable from both the caller's thread and
/// the sweep task.
pub(crate) type SharedHook<T> = Arc<dyn Fn(&str, &T) + Send + Sync>;

// == State Store ==
/// Typed, bounded, time-expiring key-value store.
///
/// Each instance owns its entries, its statistics, and (when built inside a
/// tokio runtime) a periodic sweep task that purges expired entries in the
/// background. Entries are also lazily expired on access, so the store is
/// correct without the sweeper.
///
/// All methods are synchronous; internal locks are never held while the
/// removal hook runs, so a hook may call back into the store.
pub struct StateStore<T> {
    /// Store identifier, used in log output only
    id: String,
    /// Shared mutation engine; the sweep task holds a weak reference
    inner: Arc<RwLock<StateMap<T>>>,
    /// Hook fired once per logical removal
    on_expire: Option<SharedHook<T>>,
    /// Periodic sweep task, cancelled by `destroy` (or on drop)
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl<T> StateStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Builds a store from its configuration, validating limits eagerly.
    ///
    /// When called inside a tokio runtime, a background sweep task is started
    /// at `config.sweep_interval`; outside a runtime the store falls back to
    /// lazy expiry only.
    pub fn new(config: StoreConfig<T>) -> Result<Self> {
        if config.max_size == 0 {
            return Err(StateError::InvalidConfig(
                "max_size must be at least 1".to_string(),
            ));
        }
        if config.sweep_interval.is_zero() {
            return Err(StateError::InvalidConfig(
                "sweep_interval must be non-zero".to_string(),
            ));
        }

        let inner = Arc::new(RwLock::new(StateMap::new(config.max_size, config.ttl)));
        let on_expire: Option<SharedHook<T>> = config.on_expire.map(Arc::from);

        let sweeper = if tokio::runtime::Handle::try_current().is_ok() {
            Some(spawn_sweep_task(
                config.id.clone(),
                Arc::downgrade(&inner),
                config.sweep_interval,
                on_expire.clone(),
            ))
        } else {
            debug!(
                "Store '{}' created outside a runtime; relying on lazy expiry only",
                config.id
            );
            None
        };

        Ok(Self {
            id: config.id,
            inner,
            on_expire,
            sweeper: Mutex::new(sweeper),
        })
    }

    // == Get ==
    /// Returns the value under `key` if present and unexpired, refreshing its
    /// recency. An expired entry is removed (firing the hook) and reads as
    /// absent.
    pub fn get(&self, key: &str) -> Option<T> {
        let outcome = self.write_lock().read(key, true);
        match outcome {
            ReadOutcome::Hit(value) => Some(value),
            ReadOutcome::Miss => None,
            ReadOutcome::Expired(value) => {
                self.notify(key, &value);
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites `key` with the store's default TTL.
    ///
    /// When the key is new and the store is full, the least-recently-used
    /// entry is evicted first (firing the hook). Overwrites never evict.
    pub fn set(&self, key: impl Into<String>, value: T) {
        self.set_inner(key.into(), value, None);
    }

    /// Like [`set`](Self::set), with a per-entry TTL override.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: T, ttl: Duration) {
        self.set_inner(key.into(), value, Some(ttl));
    }

    fn set_inner(&self, key: String, value: T, ttl: Option<Duration>) {
        let evicted = self.write_lock().insert(key, value, ttl);
        if let Some((evicted_key, evicted_value)) = evicted {
            debug!("Store '{}': evicted LRU key '{}'", self.id, evicted_key);
            self.notify(&evicted_key, &evicted_value);
        }
    }

    // == Has ==
    /// Expiry-aware presence check; does not refresh recency. An expired
    /// entry is removed (firing the hook) and reads as absent.
    pub fn has(&self, key: &str) -> bool {
        let outcome = self.write_lock().read(key, false);
        match outcome {
            ReadOutcome::Hit(_) => true,
            ReadOutcome::Miss => false,
            ReadOutcome::Expired(value) => {
                self.notify(key, &value);
                false
            }
        }
    }

    // == Delete ==
    /// Removes `key` if present, firing the hook with its last value.
    /// Returns whether a removal occurred.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.write_lock().remove(key);
        match removed {
            Some(value) => {
                self.notify(key, &value);
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Empties the store, firing the hook once per entry.
    pub fn clear(&self) {
        let drained = self.write_lock().drain_all();
        for (key, value) in &drained {
            self.notify(key, value);
        }
    }

    // == Raw Accessors ==
    // Snapshots of current contents: no expiry checks, no access bump.
    // Logically expired but not-yet-swept entries are included.

    /// Current entry count, including unswept expired entries.
    pub fn len(&self) -> usize {
        self.read_lock().len()
    }

    /// Returns whether the store holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of current keys; ordering is not meaningful.
    pub fn keys(&self) -> Vec<String> {
        self.read_lock().keys()
    }

    /// Snapshot of current values.
    pub fn values(&self) -> Vec<T> {
        self.read_lock().values()
    }

    /// Snapshot of current key-value pairs.
    pub fn entries(&self) -> Vec<(String, T)> {
        self.read_lock().snapshot()
    }

    // == Stats ==
    /// Activity counters for this store.
    pub fn stats(&self) -> StoreStats {
        self.read_lock().stats()
    }

    // == Identifier ==
    pub fn id(&self) -> &str {
        &self.id
    }

    // == Destroy ==
    /// Stops the background sweep and empties the store, firing the hook
    /// once per remaining entry. Safe to call multiple times.
    pub fn destroy(&self) {
        let handle = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("Store '{}': sweep task stopped", self.id);
        }
        self.clear();
    }

    // == Internals ==
    fn notify(&self, key: &str, value: &T) {
        if let Some(hook) = &self.on_expire {
            hook(key, value);
        }
    }

    // Poisoning can only come from a panic inside the engine, which never
    // leaves the map half-mutated; recover rather than cascade the panic.
    fn read_lock(&self) -> RwLockReadGuard<'_, StateMap<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, StateMap<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Drop for StateStore<T> {
    fn drop(&mut self) {
        // Stop the sweeper; entries just drop, the hook does not fire here.
        if let Some(handle) = self
            .sweeper
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }
}

impl<T> std::fmt::Debug for StateStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateStore")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
