//! Error types for statekit
//!
//! Provides unified error handling using thiserror.
//!
//! The data structures themselves favor `Option`/`bool` returns over errors:
//! a missing key is an ordinary outcome, not a failure. These kinds exist for
//! eager configuration validation and for callers that want a hard failure
//! (e.g. `CircularQueue::try_dequeue`).

use thiserror::Error;

// == State Error Enum ==
/// Errors raised by the state store layer.
#[derive(Error, Debug)]
pub enum StateError {
    /// Store configuration rejected at construction
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),

    /// Store-level misuse detected by wrapping code
    #[error("State store misuse: {0}")]
    Misuse(String),
}

// == Queue Error Enum ==
/// Errors raised by the circular queue layer.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueueError {
    /// Dequeue or peek on an empty queue, requested as a hard failure
    #[error("Queue is empty")]
    Empty,
}

// == Result Type Alias ==
/// Convenience Result type for store construction and configuration.
pub type Result<T> = std::result::Result<T, StateError>;
