//! Eviction Module
//!
//! Batch eviction of the oldest-inserted entries when the cache is full.

use std::collections::HashMap;

use crate::cache::CacheEntry;

/// Fraction of the current entries removed per eviction batch, as a divisor.
const EVICTION_DIVISOR: usize = 10;

// == Eviction Count ==
/// Number of entries to remove before inserting one more key.
///
/// Removes `ceil(len / 10)` entries, and never fewer than needed to bring the
/// map back under `capacity` with room for the new key. Returns `0` only when
/// the map is empty.
pub fn eviction_count(len: usize, capacity: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let batch = len.div_ceil(EVICTION_DIVISOR);
    let room = (len + 1).saturating_sub(capacity);
    batch.max(room).min(len)
}

// == Select Victims ==
/// Picks the keys to evict, oldest insertion first.
///
/// Reads do not refresh an entry's age, and expired entries are not treated
/// specially: they are ordered by insertion like every other entry.
pub fn select_victims(entries: &HashMap<String, CacheEntry>, capacity: usize) -> Vec<String> {
    oldest_keys(entries, eviction_count(entries.len(), capacity))
}

// == Oldest Keys ==
/// Returns the `count` oldest-inserted keys, oldest first.
pub fn oldest_keys(entries: &HashMap<String, CacheEntry>, count: usize) -> Vec<String> {
    if count == 0 {
        return Vec::new();
    }

    let mut by_age: Vec<(&String, &CacheEntry)> = entries.iter().collect();
    by_age.sort_by_key(|(_, entry)| entry.age_key());

    by_age
        .into_iter()
        .take(count)
        .map(|(key, _)| key.clone())
        .collect()
}
