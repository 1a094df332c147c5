//! State Entry Module
//!
//! Defines the structure for individual store entries with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == State Entry ==
/// A single cached value with its expiry and access metadata.
///
/// Timestamps use [`tokio::time::Instant`] so tests can drive expiry with a
/// paused clock (`tokio::time::advance`).
#[derive(Debug, Clone)]
pub struct StateEntry<T> {
    /// The cached value
    pub data: T,
    /// Instant after which the entry is considered gone
    pub expires_at: Instant,
    /// Instant of the last successful read; LRU ordering key
    pub last_accessed: Instant,
}

impl<T> StateEntry<T> {
    // == Constructor ==
    /// Creates an entry expiring `ttl` from now, marked as just accessed.
    pub fn new(data: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            data,
            expires_at: now + ttl,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired once the current time reaches
    /// the expiry instant, so a zero TTL entry is expired on its very next
    /// check.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Touch ==
    /// Marks the entry as accessed right now.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    // == Time To Live ==
    /// Returns the remaining time before expiry, floored at zero.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::advance;

    #[tokio::test(start_paused = true)]
    async fn test_entry_fresh_not_expired() {
        let entry = StateEntry::new("value", Duration::from_secs(60));

        assert_eq!(entry.data, "value");
        assert!(!entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let entry = StateEntry::new("value", Duration::from_secs(60));

        advance(Duration::from_secs(59)).await;
        assert!(!entry.is_expired());

        advance(Duration::from_secs(1)).await;
        assert!(entry.is_expired(), "Entry should be expired at boundary");
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_zero_ttl_expires_immediately() {
        let entry = StateEntry::new(42u32, Duration::ZERO);
        assert!(entry.is_expired());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_remaining_counts_down() {
        let entry = StateEntry::new((), Duration::from_secs(10));

        assert_eq!(entry.ttl_remaining(), Duration::from_secs(10));

        advance(Duration::from_secs(4)).await;
        assert_eq!(entry.ttl_remaining(), Duration::from_secs(6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ttl_remaining_floors_at_zero() {
        let entry = StateEntry::new((), Duration::from_secs(1));

        advance(Duration::from_secs(5)).await;
        assert_eq!(entry.ttl_remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_updates_last_accessed() {
        let mut entry = StateEntry::new((), Duration::from_secs(60));
        let created = entry.last_accessed;

        advance(Duration::from_secs(5)).await;
        entry.touch();

        assert_eq!(entry.last_accessed, created + Duration::from_secs(5));
    }
}
