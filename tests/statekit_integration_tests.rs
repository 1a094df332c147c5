//! Integration tests for statekit
//!
//! Exercises the three components together the way a hosting application
//! would: a state store caching per-user data, a cooldown map rate-limiting
//! commands, and a circular queue buffering pending work.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::advance;

use statekit::{define_store, CircularQueue, CooldownMap, StoreConfig};

/// Initializes tracing once for the whole test binary.
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "statekit=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    name: String,
    level: u32,
}

#[tokio::test(start_paused = true)]
async fn store_caches_profiles_with_ttl_and_eviction() {
    init_tracing();

    let removed: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let store = {
        let removed = removed.clone();
        define_store(
            StoreConfig::new("profiles")
                .max_size(2)
                .ttl(Duration::from_secs(1800))
                .sweep_interval(Duration::from_secs(60))
                .on_expire(move |key, _profile: &Profile| {
                    removed.lock().unwrap().push(key.to_string());
                }),
        )
        .unwrap()
    };

    store.set(
        "user:1",
        Profile {
            name: "Ada".into(),
            level: 3,
        },
    );
    store.set(
        "user:2",
        Profile {
            name: "Grace".into(),
            level: 5,
        },
    );

    // Refresh user:1, then force an eviction: user:2 is the LRU
    assert!(store.get("user:1").is_some());
    store.set(
        "user:3",
        Profile {
            name: "Edsger".into(),
            level: 1,
        },
    );

    assert_eq!(store.get("user:2"), None);
    assert_eq!(removed.lock().unwrap().as_slice(), ["user:2"]);

    // TTL elapses; the periodic sweep drains the rest
    advance(Duration::from_secs(1801)).await;
    tokio::task::yield_now().await;

    assert!(store.is_empty());
    let mut all_removed = removed.lock().unwrap().clone();
    all_removed.sort();
    assert_eq!(all_removed, ["user:1", "user:2", "user:3"]);

    store.destroy();
}

#[tokio::test(start_paused = true)]
async fn cooldown_gates_command_invocations() {
    init_tracing();

    let cooldowns = CooldownMap::new();

    // First invocation allowed, second blocked
    assert!(cooldowns.set_cooldown("u1:ping", Duration::from_secs(1)));
    assert!(!cooldowns.set_cooldown("u1:ping", Duration::from_secs(1)));

    let remaining = cooldowns.remaining("u1:ping");
    assert!(remaining > Duration::ZERO && remaining <= Duration::from_secs(1));

    // Independent key is unaffected
    assert!(cooldowns.set_cooldown("u2:ping", Duration::from_secs(1)));

    advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;

    assert!(!cooldowns.has_cooldown("u1:ping"));
    assert!(cooldowns.set_cooldown("u1:ping", Duration::from_millis(500)));
}

#[tokio::test(start_paused = true)]
async fn queue_buffers_work_between_store_and_cooldown() {
    init_tracing();

    let store = define_store(
        StoreConfig::new("jobs")
            .max_size(100)
            .ttl(Duration::from_secs(3600)),
    )
    .unwrap();
    let mut pending: CircularQueue<String> = CircularQueue::new();

    for i in 0..20 {
        let key = format!("job:{i}");
        store.set(key.clone(), i);
        pending.enqueue(key);
    }
    assert_eq!(pending.len(), 20);
    assert_eq!(pending.capacity(), 32); // one doubling past the default 16

    // Drain in FIFO order; every queued key resolves in the store
    let mut processed = 0;
    while let Some(key) = pending.dequeue() {
        assert_eq!(key, format!("job:{processed}"));
        assert_eq!(store.get(&key), Some(processed));
        processed += 1;
    }
    assert_eq!(processed, 20);
    assert!(pending.is_empty());
}

#[tokio::test(start_paused = true)]
async fn expire_hooks_count_every_removal_cause() {
    init_tracing();

    let count = Arc::new(AtomicUsize::new(0));
    let store = {
        let count = count.clone();
        define_store(
            StoreConfig::new("counts")
                .max_size(3)
                .ttl(Duration::from_secs(10))
                .sweep_interval(Duration::from_secs(5))
                .on_expire(move |_key, _value: &u8| {
                    count.fetch_add(1, Ordering::SeqCst);
                }),
        )
        .unwrap()
    };

    store.set("a", 1); // later removed by delete
    store.set("b", 2); // later evicted
    store.set("c", 3); // later swept
    assert!(store.delete("a"));
    store.set("d", 4); // fills the freed slot
    store.set("e", 5); // evicts b (LRU)

    assert_eq!(count.load(Ordering::SeqCst), 2);

    advance(Duration::from_secs(11)).await;
    tokio::task::yield_now().await;

    // c, d, e all swept after their TTL
    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert!(store.is_empty());
}

#[tokio::test(start_paused = true)]
async fn stats_snapshot_serializes() {
    init_tracing();

    let store = define_store(
        StoreConfig::new("stats")
            .max_size(10)
            .ttl(Duration::from_secs(60)),
    )
    .unwrap();
    store.set("k", 1u8);
    store.get("k");
    store.get("missing");

    let json = serde_json::to_value(store.stats()).unwrap();
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["entries"], 1);
    assert_eq!(json["evictions"], 0);
}
