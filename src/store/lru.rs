//! Recency Tracking Module
//!
//! Keeps store keys ordered by how recently they were touched, so eviction
//! can pick the least-recently-used key in O(1).

use std::collections::VecDeque;

// == Recency List ==
/// Access-order list of store keys.
///
/// Front = most recently touched, back = least recently touched. Keys with
/// identical access timestamps keep their touch order, which makes the LRU
/// tie-break deterministic: the one touched longest ago goes first.
#[derive(Debug, Default)]
pub struct RecencyList {
    order: VecDeque<String>,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty recency list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Moves a key to the most-recently-used position, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    // == Forget ==
    /// Drops a key from the list; no-op if absent.
    pub fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Pop LRU ==
    /// Removes and returns the least-recently-used key, if any.
    pub fn pop_lru(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    // == Peek LRU ==
    /// Returns the least-recently-used key without removing it.
    #[allow(dead_code)]
    pub fn peek_lru(&self) -> Option<&String> {
        self.order.back()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Clear ==
    /// Drops all tracked keys.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
