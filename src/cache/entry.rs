//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with per-entry TTL.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with its payload and lifetime metadata.
///
/// The serialized field names are the snapshot format written to the
/// durable medium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The stored payload, never interpreted by the cache
    pub data: Value,
    /// Insertion timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Time-to-live in milliseconds; non-positive means already expired
    pub ttl: i64,
    /// Insertion sequence, breaks ties between same-millisecond inserts
    #[serde(default)]
    pub seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    ///
    /// # Arguments
    /// * `data` - The payload to store
    /// * `ttl_ms` - TTL in milliseconds
    /// * `seq` - Insertion sequence number assigned by the store
    pub fn new(data: Value, ttl_ms: i64, seq: u64) -> Self {
        Self {
            data,
            timestamp: current_timestamp_ms(),
            ttl: ttl_ms,
            seq,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry stays live while `now - timestamp <= ttl`, so it expires only
    /// once strictly more than `ttl` milliseconds have passed. A non-positive
    /// TTL is expired from the start.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(current_timestamp_ms())
    }

    /// Expiry check against an explicit instant (Unix milliseconds).
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.ttl <= 0 || now_ms.saturating_sub(self.timestamp) > self.ttl
    }

    /// Ordering key for insertion-age eviction: oldest first.
    pub fn age_key(&self) -> (i64, u64) {
        (self.timestamp, self.seq)
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
