//! Read-Through Helper
//!
//! Packages the fetcher convention: check the cache, call the fetcher on a
//! miss, cache the successful result. The store itself never calls out.

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::CacheStore;

/// Returns the cached value for `key`, or fetches, caches and returns it.
///
/// A cached payload that does not decode as `T` counts as a miss and is
/// replaced by the fetched value. Fetch errors are returned untouched and
/// leave the cache as it was.
///
/// # Arguments
/// * `store` - The cache to read through
/// * `key` - Cache key, usually built with [`crate::cache::keys`]
/// * `ttl` - TTL in milliseconds for the fetched value (default TTL if None)
/// * `fetcher` - Performs the actual request on a miss
pub async fn get_or_fetch<T, E, F, Fut>(
    store: &mut CacheStore,
    key: &str,
    ttl: Option<i64>,
    fetcher: F,
) -> Result<T, E>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    if let Some(cached) = store.get(key) {
        match serde_json::from_value::<T>(cached) {
            Ok(value) => {
                debug!("Cache hit for '{}'", key);
                return Ok(value);
            }
            Err(e) => warn!("Cached payload for '{}' has unexpected shape: {}", key, e),
        }
    }

    let value = fetcher().await?;
    match serde_json::to_value(&value) {
        Ok(payload) => store.set(key, payload, ttl),
        Err(e) => warn!("Fetched value for '{}' not cacheable: {}", key, e),
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::keys;
    use crate::storage::MemoryMedium;
    use serde::Deserialize;
    use serde_json::json;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Card {
        id: String,
        name: String,
    }

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            name: format!("Card {id}"),
        }
    }

    fn new_store() -> CacheStore {
        CacheStore::with_options(MemoryMedium::new(), 10, 60_000, "cartalia-cache")
    }

    #[tokio::test]
    async fn test_miss_fetches_and_caches() {
        let mut store = new_store();
        let key = keys::card_detail("1");

        let fetched: Result<Card, String> =
            get_or_fetch(&mut store, &key, None, || async { Ok(card("1")) }).await;

        assert_eq!(fetched.unwrap(), card("1"));
        assert_eq!(store.get(&key), Some(json!({"id": "1", "name": "Card 1"})));
    }

    #[tokio::test]
    async fn test_hit_skips_fetcher() {
        let mut store = new_store();
        let key = keys::card_detail("1");
        store.set(key.clone(), json!({"id": "1", "name": "Cached"}), None);
        let calls = Cell::new(0);

        let fetched: Result<Card, String> = get_or_fetch(&mut store, &key, None, || async {
            calls.set(calls.get() + 1);
            Ok(card("1"))
        })
        .await;

        assert_eq!(fetched.unwrap().name, "Cached");
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_fetch_error_leaves_cache_untouched() {
        let mut store = new_store();

        let fetched: Result<Card, String> = get_or_fetch(&mut store, keys::USER_CARDS, None, || async {
            Err("network down".to_string())
        })
        .await;

        assert_eq!(fetched.unwrap_err(), "network down");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_payload_is_refetched() {
        let mut store = new_store();
        let key = keys::card_detail("2");
        store.set(key.clone(), json!("not a card"), None);

        let fetched: Result<Card, String> =
            get_or_fetch(&mut store, &key, Some(1_000), || async { Ok(card("2")) }).await;

        assert_eq!(fetched.unwrap(), card("2"));
        assert_eq!(store.get(&key).unwrap()["id"], "2");
    }
}
