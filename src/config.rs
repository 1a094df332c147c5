//! Store Configuration Module
//!
//! Configuration for state store instances, with sensible defaults.

use std::time::Duration;

/// Hook invoked once per logical removal (delete, eviction, expiry, clear).
pub type ExpireHook<T> = Box<dyn Fn(&str, &T) + Send + Sync>;

/// Configuration for a [`StateStore`](crate::StateStore) instance.
///
/// All limits have defaults; only the identifier is required.
pub struct StoreConfig<T> {
    /// Store identifier, used in log output only
    pub id: String,
    /// Maximum number of entries before LRU eviction kicks in
    pub max_size: usize,
    /// Default per-entry time-to-live
    pub ttl: Duration,
    /// Interval between background sweeps of expired entries
    pub sweep_interval: Duration,
    /// Optional removal hook
    pub on_expire: Option<ExpireHook<T>>,
}

/// Default capacity bound.
pub const DEFAULT_MAX_SIZE: usize = 1000;

/// Default per-entry time-to-live (1 hour).
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default background sweep interval (5 minutes).
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

impl<T> StoreConfig<T> {
    /// Creates a configuration with default limits for the given store id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_size: DEFAULT_MAX_SIZE,
            ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            on_expire: None,
        }
    }

    /// Sets the maximum entry count.
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the default per-entry time-to-live.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the background sweep interval.
    pub fn sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }

    /// Registers a hook fired once per removed entry, whatever the cause.
    pub fn on_expire(mut self, hook: impl Fn(&str, &T) + Send + Sync + 'static) -> Self {
        self.on_expire = Some(Box::new(hook));
        self
    }
}

impl<T> std::fmt::Debug for StoreConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("id", &self.id)
            .field("max_size", &self.max_size)
            .field("ttl", &self.ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("on_expire", &self.on_expire.is_some())
            .finish()
    }
}
