//! Error types for the response cache
//!
//! Provides unified error handling using thiserror. None of these errors ever
//! escape the cache's read/write operations; they exist for the durable
//! medium, configuration, and the maintenance binary.

use thiserror::Error;

// == Storage Error Enum ==
/// Failure reported by a durable medium.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Write rejected because it would exceed the medium's quota
    #[error("Quota exceeded: needed {needed} bytes, quota is {quota} bytes")]
    QuotaExceeded { needed: usize, quota: usize },

    /// Medium cannot be used (poisoned lock, missing backend)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Durable medium failure
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Snapshot or payload (de)serialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
