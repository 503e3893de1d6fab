//! Cache Module
//!
//! Response cache with per-entry TTL, batch eviction by insertion age, and
//! persistence to a durable medium.

mod entry;
mod eviction;
pub mod keys;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use eviction::eviction_count;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Cache store shared between tasks. All access still goes through the
/// store's own operations.
pub type SharedCache = Arc<RwLock<CacheStore>>;

/// Wraps a store for sharing with background tasks.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
