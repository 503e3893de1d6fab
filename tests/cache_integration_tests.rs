//! Integration Tests for the Cache Store
//!
//! Drives the public API end to end: eviction, per-entry TTL, restarts
//! against the same durable medium, and damaged storage.

use card_cache::cache::keys;
use card_cache::{get_or_fetch, CacheStore, Config, DurableMedium, FileMedium, MemoryMedium};
use serde_json::json;
use std::thread::sleep;
use std::time::Duration;

// == Helper Functions ==

const STORAGE_KEY: &str = "cartalia-cache";

fn create_store(medium: &MemoryMedium, capacity: usize) -> CacheStore {
    CacheStore::with_options(medium.clone(), capacity, 60_000, STORAGE_KEY)
}

// == Eviction ==

#[test]
fn test_capacity_three_scenario() {
    let medium = MemoryMedium::new();
    let mut store = create_store(&medium, 3);

    store.set("a", json!(1), None);
    store.set("b", json!(2), None);
    store.set("c", json!(3), None);
    assert_eq!(store.len(), 3);
    assert!(store.is_full());

    store.set("d", json!(4), None);

    assert!(store.get("a").is_none());
    assert_eq!(store.get("d"), Some(json!(4)));
    assert_eq!(store.len(), 3);
}

#[test]
fn test_eviction_leaves_room_for_new_key() {
    let mut store = create_store(&MemoryMedium::new(), 50);
    for i in 0..50 {
        store.set(format!("card-{i}"), json!({ "id": i }), None);
    }

    store.set("card-new", json!({ "id": "new" }), None);

    // ceil(50 * 0.1) = 5 oldest removed
    assert_eq!(store.len(), 46);
    for i in 0..5 {
        assert!(!store.has(&format!("card-{i}")));
    }
    assert!(store.has("card-5"));
    assert!(store.has("card-new"));
}

// == TTL ==

#[test]
fn test_per_entry_ttl_override() {
    let mut store = create_store(&MemoryMedium::new(), 10);

    store.set("x", json!(1), Some(10));
    store.set("y", json!(2), Some(100_000));

    sleep(Duration::from_millis(50));

    assert!(store.get("x").is_none());
    assert_eq!(store.get("y"), Some(json!(2)));
}

#[test]
fn test_default_ttl_from_config() {
    let config = Config {
        default_ttl_ms: 10,
        ..Default::default()
    };
    let mut store = CacheStore::new(MemoryMedium::new(), &config);

    store.set(keys::USER_PROFILE, json!({ "name": "ash" }), None);
    assert!(store.has(keys::USER_PROFILE));

    sleep(Duration::from_millis(40));

    assert!(!store.has(keys::USER_PROFILE));
    assert!(store.is_empty());
}

// == Persistence ==

#[test]
fn test_restart_roundtrip() {
    let medium = MemoryMedium::new();
    let page = keys::cards_page(1, 10, Some("dragon"));
    {
        let mut store = create_store(&medium, 10);
        store.set(page.clone(), json!({ "list": [1, 2, 3], "more": false }), None);
        store.set(keys::card_detail("42"), json!({ "id": "42" }), None);
    }

    let mut restarted = create_store(&medium, 10);

    assert_eq!(restarted.len(), 2);
    assert_eq!(
        restarted.get(&page),
        Some(json!({ "list": [1, 2, 3], "more": false }))
    );
    assert_eq!(restarted.get(&keys::card_detail("42")), Some(json!({ "id": "42" })));
}

#[test]
fn test_restart_after_clear_is_empty() {
    let medium = MemoryMedium::new();
    {
        let mut store = create_store(&medium, 10);
        store.set("a", json!(1), None);
        store.clear();
    }

    let restarted = create_store(&medium, 10);
    assert!(restarted.is_empty());
}

#[test]
fn test_snapshot_from_previous_version_loads() {
    let medium = MemoryMedium::new();
    let now = card_cache::cache::current_timestamp_ms();
    medium.seed(
        STORAGE_KEY,
        &format!(
            r#"{{"test-key":{{"data":{{"id":1,"name":"Test"}},"timestamp":{now},"ttl":60000}}}}"#
        ),
    );

    let mut store = create_store(&medium, 10);
    assert_eq!(store.get("test-key"), Some(json!({ "id": 1, "name": "Test" })));
}

#[test]
fn test_corrupt_snapshot_is_discarded() {
    let medium = MemoryMedium::new();
    medium.seed(STORAGE_KEY, "invalid-json");

    let mut store = create_store(&medium, 10);
    assert_eq!(store.len(), 0);

    // The next write replaces the damaged snapshot
    store.set("a", json!(1), None);
    let raw = medium.get(STORAGE_KEY).unwrap().unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}

#[test]
fn test_quota_failure_keeps_memory_authoritative() {
    let medium = MemoryMedium::with_quota(128);
    let mut store = create_store(&medium, 10);

    store.set("small", json!(1), None);
    store.set("large", json!("z".repeat(256)), None);

    assert_eq!(store.get("large"), Some(json!("z".repeat(256))));
    assert_eq!(store.get("small"), Some(json!(1)));
    assert_eq!(store.stats().persist_failures, 1);

    // Only the last accepted snapshot survives a restart
    let restarted = create_store(&medium, 10);
    assert_eq!(restarted.len(), 1);
}

#[test]
fn test_file_medium_restart_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    {
        let medium = FileMedium::new(dir.path()).unwrap();
        let mut store = CacheStore::with_options(medium, 10, 60_000, STORAGE_KEY);
        store.set(keys::USER_CARDS, json!([{ "id": "1" }, { "id": "2" }]), None);
    }

    let medium = FileMedium::new(dir.path()).unwrap();
    let mut store = CacheStore::with_options(medium, 10, 60_000, STORAGE_KEY);
    assert_eq!(
        store.get(keys::USER_CARDS),
        Some(json!([{ "id": "1" }, { "id": "2" }]))
    );
}

#[test]
fn test_file_medium_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let medium = FileMedium::new(dir.path()).unwrap();
    medium.set(STORAGE_KEY, "{\"truncated\": ").unwrap();

    let store = CacheStore::with_options(medium, 10, 60_000, STORAGE_KEY);
    assert!(store.is_empty());
}

// == Read-Through ==

#[tokio::test]
async fn test_read_through_survives_restart() {
    let medium = MemoryMedium::new();
    let key = keys::trades_page(1, 10);
    {
        let mut store = create_store(&medium, 10);
        let trades: Result<Vec<String>, String> =
            get_or_fetch(&mut store, &key, None, || async { Ok(vec!["t1".to_string()]) }).await;
        assert_eq!(trades.unwrap(), vec!["t1".to_string()]);
    }

    let mut restarted = create_store(&medium, 10);
    let trades: Result<Vec<String>, String> = get_or_fetch(&mut restarted, &key, None, || async {
        Err("fetcher should not run".to_string())
    })
    .await;
    assert_eq!(trades.unwrap(), vec!["t1".to_string()]);
}
