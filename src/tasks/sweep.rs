//! TTL Sweep Task
//!
//! Background task that periodically removes expired store entries.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{PoisonError, RwLock, Weak};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::store::map::StateMap;
use crate::store::SharedHook;

/// Spawns the periodic sweep for a store.
///
/// Every `interval`, the task upgrades its weak reference to the store map,
/// removes all expired entries under a short write lock, and fires the
/// removal hook once per entry with the lock released. The task exits on its
/// own once the store has been dropped, and `StateStore::destroy` aborts it
/// directly; either way an abandoned store is never kept alive by its
/// sweeper.
///
/// Each hook invocation is isolated: a panicking hook is caught and logged so
/// it cannot abort the removal of sibling entries.
pub(crate) fn spawn_sweep_task<T>(
    store_id: String,
    map: Weak<RwLock<StateMap<T>>>,
    interval: Duration,
    on_expire: Option<SharedHook<T>>,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    tokio::spawn(async move {
        debug!(
            "Store '{}': sweep task started with interval {:?}",
            store_id, interval
        );

        loop {
            tokio::time::sleep(interval).await;

            let Some(map) = map.upgrade() else {
                debug!("Store '{}': dropped, sweep task exiting", store_id);
                break;
            };

            let removed = {
                let mut guard = map.write().unwrap_or_else(PoisonError::into_inner);
                guard.sweep_expired()
            };

            if let Some(hook) = &on_expire {
                for (key, value) in &removed {
                    let outcome = catch_unwind(AssertUnwindSafe(|| hook(key.as_str(), value)));
                    if outcome.is_err() {
                        error!(
                            "Store '{}': on_expire hook panicked for key '{}'",
                            store_id, key
                        );
                    }
                }
            }

            if removed.is_empty() {
                debug!("Store '{}': sweep found no expired entries", store_id);
            } else {
                info!(
                    "Store '{}': sweep removed {} expired entries",
                    store_id,
                    removed.len()
                );
            }
        }
    })
}
