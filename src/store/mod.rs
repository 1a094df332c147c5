//! State Store Module
//!
//! Typed, bounded, time-expiring key-value state management with LRU
//! eviction, periodic sweeping, and removal hooks.

mod entry;
mod lru;
pub(crate) mod map;
mod stats;
mod store;


// Re-export public types
pub use entry::StateEntry;
pub use stats::StoreStats;
pub use store::StateStore;

pub(crate) use lru::RecencyList;
pub(crate) use store::SharedHook;

use crate::config::StoreConfig;
use crate::error::Result;

// == Store Factory ==
/// Creates a [`StateStore`] from its configuration.
///
/// Validates the configuration eagerly and, when a tokio runtime is current,
/// starts the store's background sweep task.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use statekit::{define_store, StoreConfig};
///
/// let store = define_store(
///     StoreConfig::new("profiles")
///         .max_size(500)
///         .ttl(Duration::from_secs(1800)),
/// )
/// .unwrap();
///
/// store.set("user:1", "Ada".to_string());
/// assert_eq!(store.get("user:1"), Some("Ada".to_string()));
/// ```
pub fn define_store<T>(config: StoreConfig<T>) -> Result<StateStore<T>>
where
    T: Clone + Send + Sync + 'static,
{
    StateStore::new(config)
}
