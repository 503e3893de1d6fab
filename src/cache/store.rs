//! Cache Store Module
//!
//! Main cache engine: HashMap storage with per-entry TTL, batch eviction by
//! insertion age, and whole-map snapshots to a durable medium.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{eviction, CacheEntry, CacheStats};
use crate::config::Config;
use crate::error::Result;
use crate::storage::DurableMedium;

// == Cache Store ==
/// Capacity-bounded TTL cache persisted to a [`DurableMedium`].
///
/// The in-memory map is the source of truth. The medium only provides a warm
/// start: a missing or unreadable snapshot is an empty cache, and failed
/// writes are logged and otherwise ignored. No operation returns an error.
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    default_ttl: i64,
    /// Sequence number handed to the next inserted entry
    next_seq: u64,
    /// Where snapshots are written
    medium: Box<dyn DurableMedium>,
    /// Medium key holding the snapshot
    storage_key: String,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a store from configuration and hydrates it from `medium`.
    pub fn new(medium: impl DurableMedium + 'static, config: &Config) -> Self {
        Self::with_options(
            medium,
            config.max_size,
            config.default_ttl_ms,
            config.storage_key.clone(),
        )
    }

    /// Creates a store with explicit parameters and hydrates it from `medium`.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries (values below 1 are raised to 1)
    /// * `default_ttl_ms` - TTL in milliseconds for entries set without one
    /// * `storage_key` - Medium key the snapshot lives under
    pub fn with_options(
        medium: impl DurableMedium + 'static,
        capacity: usize,
        default_ttl_ms: i64,
        storage_key: impl Into<String>,
    ) -> Self {
        let mut store = Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            capacity: capacity.max(1),
            default_ttl: default_ttl_ms,
            next_seq: 0,
            medium: Box::new(medium),
            storage_key: storage_key.into(),
        };
        store.initialize();
        store
    }

    // == Initialize ==
    /// Replaces the in-memory map with the snapshot stored in the medium.
    ///
    /// An absent snapshot gives an empty cache. An unreadable or unparseable
    /// one is logged and discarded. Entries that expired while the process
    /// was down are purged right away, and if the snapshot was written under
    /// a larger capacity the oldest entries are evicted until it fits.
    pub fn initialize(&mut self) {
        self.entries = match self.load_snapshot() {
            Ok(Some(entries)) => entries,
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!(
                    "Discarding unreadable cache snapshot '{}': {}",
                    self.storage_key, e
                );
                HashMap::new()
            }
        };
        self.next_seq = self
            .entries
            .values()
            .map(|entry| entry.seq.saturating_add(1))
            .max()
            .unwrap_or(0);

        let loaded = self.entries.len();
        let purged = self.purge_expired();
        let overflow = self.entries.len().saturating_sub(self.capacity);
        if overflow > 0 {
            self.evict_oldest(overflow);
        }
        if purged > 0 || overflow > 0 {
            self.persist();
        }
        self.stats.set_total_entries(self.entries.len());
        info!(
            "Cache initialized from '{}': {} entries loaded, {} expired, {} over capacity",
            self.storage_key, loaded, purged, overflow
        );
    }

    fn load_snapshot(&self) -> Result<Option<HashMap<String, CacheEntry>>> {
        let Some(raw) = self.medium.get(&self.storage_key)? else {
            return Ok(None);
        };
        let entries = serde_json::from_str(&raw)?;
        Ok(Some(entries))
    }

    // == Persist ==
    /// Writes the whole map to the medium. Failures are logged and counted.
    fn persist(&mut self) {
        if let Err(e) = self.write_snapshot() {
            self.stats.record_persist_failure();
            warn!("Failed to persist cache snapshot: {}", e);
        }
    }

    fn write_snapshot(&self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)?;
        self.medium.set(&self.storage_key, &json)?;
        Ok(())
    }

    // == Set ==
    /// Stores a value with an optional TTL in milliseconds.
    ///
    /// If the key is new and the cache is full, the oldest-inserted batch of
    /// entries is evicted first. Overwriting an existing key resets its age
    /// and TTL. A TTL of zero or less stores an entry that is already expired.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The payload to store
    /// * `ttl` - Optional TTL in milliseconds (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Option<i64>) {
        let key = key.into();
        let ttl = ttl.unwrap_or(self.default_ttl);
        if ttl <= 0 {
            debug!("Key '{}' stored with non-positive ttl {}", key, ttl);
        }

        if !self.entries.contains_key(&key) && self.is_full() {
            self.evict();
        }

        let entry = CacheEntry::new(value, ttl, self.next_seq);
        self.next_seq = self.next_seq.saturating_add(1);
        self.entries.insert(key, entry);

        self.stats.set_total_entries(self.entries.len());
        self.persist();
    }

    // == Get ==
    /// Retrieves a live value by key.
    ///
    /// An expired entry is removed (and the snapshot rewritten) before
    /// returning `None`.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            debug!("Key '{}' expired on read", key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            self.persist();
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.data.clone())
    }

    // == Has ==
    /// Returns true if `key` holds a live value. Applies lazy expiry like [`get`](Self::get).
    pub fn has(&mut self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Remove ==
    /// Removes an entry whether or not it has expired.
    ///
    /// Returns whether anything was removed; the snapshot is only rewritten
    /// when it was.
    pub fn remove(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_none() {
            return false;
        }
        self.stats.set_total_entries(self.entries.len());
        self.persist();
        true
    }

    // == Clear ==
    /// Removes every entry and persists the empty map.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
        self.persist();
    }

    // == Cleanup Expired ==
    /// Removes all expired entries in one pass and persists once.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let removed = self.purge_expired();
        self.stats.set_total_entries(self.entries.len());
        self.persist();
        removed
    }

    fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        removed
    }

    fn evict(&mut self) {
        let victims = eviction::select_victims(&self.entries, self.capacity);
        self.drop_victims(&victims);
    }

    fn evict_oldest(&mut self, count: usize) {
        let victims = eviction::oldest_keys(&self.entries, count);
        self.drop_victims(&victims);
    }

    fn drop_victims(&mut self, victims: &[String]) {
        for key in victims {
            self.entries.remove(key);
        }
        self.stats.record_evictions(victims.len());
        debug!("Evicted {} oldest entries", victims.len());
    }

    // == Length ==
    /// Returns the number of entries in the map, including expired entries
    /// that no read or sweep has purged yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Is Full ==
    /// Returns true once the map holds `capacity` entries.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    // == Capacity ==
    /// Returns the maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Default TTL ==
    /// Returns the TTL in milliseconds applied when `set` gets none.
    pub fn default_ttl_ms(&self) -> i64 {
        self.default_ttl
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}

impl fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheStore")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("default_ttl", &self.default_ttl)
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}
