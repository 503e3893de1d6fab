//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default maximum number of cached entries
pub const DEFAULT_MAX_SIZE: usize = 100;
/// Default TTL: 5 minutes
pub const DEFAULT_TTL_MS: i64 = 5 * 60 * 1000;
/// Default cleanup interval: 30 minutes
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 30 * 60 * 1000;
/// Reserved key the whole cache snapshot is stored under
pub const DEFAULT_STORAGE_KEY: &str = "cartalia-cache";
/// Default directory for the file-backed durable medium
pub const DEFAULT_CACHE_DIR: &str = ".card-cache";

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// None of these are persisted alongside the cache snapshot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: i64,
    /// Interval between scheduled expiry sweeps, in milliseconds
    pub cleanup_interval_ms: u64,
    /// Durable medium key holding the snapshot
    pub storage_key: String,
    /// Base directory for the file-backed medium
    pub cache_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Maximum cache entries (default: 100)
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency in milliseconds (default: 1800000)
    /// - `CACHE_STORAGE_KEY` - Snapshot key (default: `cartalia-cache`)
    /// - `CACHE_DIR` - Durable medium directory (default: `.card-cache`)
    pub fn from_env() -> Self {
        Self {
            max_size: parse_var("CACHE_MAX_SIZE").unwrap_or(DEFAULT_MAX_SIZE),
            default_ttl_ms: parse_var("CACHE_DEFAULT_TTL_MS").unwrap_or(DEFAULT_TTL_MS),
            cleanup_interval_ms: parse_var("CACHE_CLEANUP_INTERVAL_MS")
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL_MS),
            storage_key: env::var("CACHE_STORAGE_KEY")
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            cache_dir: env::var("CACHE_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
        }
    }

    /// Rejects values the cache cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be at least 1".to_string(),
            ));
        }
        if self.cleanup_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "cleanup_interval_ms must be greater than 0".to_string(),
            ));
        }
        if self.storage_key.is_empty() {
            return Err(CacheError::InvalidConfig(
                "storage_key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Cleanup interval as a [`Duration`].
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            default_ttl_ms: DEFAULT_TTL_MS,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}
