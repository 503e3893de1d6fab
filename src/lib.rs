//! Card Cache - persistent response cache for a trading-card marketplace client
//!
//! Provides a capacity-bounded key/value cache with per-entry TTL, batch
//! eviction by insertion age, and warm starts from a durable medium.

pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod storage;
pub mod tasks;

pub use cache::{CacheStore, SharedCache};
pub use config::Config;
pub use fetch::get_or_fetch;
pub use storage::{DurableMedium, FileMedium, MemoryMedium};
pub use tasks::spawn_cleanup_task;
