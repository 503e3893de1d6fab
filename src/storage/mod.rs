//! Durable Medium Module
//!
//! The flat string key/value store the cache snapshots itself into, plus an
//! in-memory and a file-backed implementation.

mod file;
mod memory;

pub use file::FileMedium;
pub use memory::MemoryMedium;

use crate::error::StorageError;

// == Durable Medium ==
/// Synchronous string-keyed, string-valued persistent store.
///
/// There are no transactional guarantees across keys. The cache reads and
/// writes exactly one key.
pub trait DurableMedium: Send + Sync {
    /// Returns the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<M: DurableMedium + ?Sized> DurableMedium for Box<M> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Rejects a write of `needed` bytes against an optional quota.
pub(crate) fn check_quota(needed: usize, quota: Option<usize>) -> Result<(), StorageError> {
    match quota {
        Some(quota) if needed > quota => Err(StorageError::QuotaExceeded { needed, quota }),
        _ => Ok(()),
    }
}
