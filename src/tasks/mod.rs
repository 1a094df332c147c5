//! Background Tasks Module
//!
//! Periodic work owned by store instances.
//!
//! # Tasks
//! - TTL Sweep: removes expired store entries at the configured interval

mod sweep;

pub(crate) use sweep::spawn_sweep_task;
