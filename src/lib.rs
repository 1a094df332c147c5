//! Statekit - typed, bounded, time-expiring in-memory state management
//!
//! Three independent components:
//! - [`StateStore`]: TTL-expiring key-value cache with LRU eviction, a
//!   periodic background sweep, and removal hooks (built via
//!   [`define_store`]).
//! - [`CircularQueue`]: FIFO queue over a growable/shrinkable ring buffer.
//! - [`CooldownMap`]: per-key rate limiting with self-expiring entries.

pub mod config;
pub mod cooldown;
pub mod error;
pub mod queue;
pub mod store;

mod tasks;

pub use config::{StoreConfig, DEFAULT_MAX_SIZE, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use cooldown::CooldownMap;
pub use error::{QueueError, StateError};
pub use queue::{CircularQueue, MIN_CAPACITY};
pub use store::{define_store, StateStore, StoreStats};
