//! In-Memory Medium
//!
//! Process-local durable medium. Clones share the same backing map, so a
//! fresh cache built on a clone behaves like a restart against the same
//! storage.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;
use crate::storage::{check_quota, DurableMedium};

/// Shared in-memory string map with an optional per-value byte quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryMedium {
    values: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Medium that rejects any value longer than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: Arc::default(),
            quota: Some(quota),
        }
    }

    /// Writes a raw value directly, bypassing the quota.
    pub fn seed(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    /// Raw value currently stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

impl DurableMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(value.len(), self.quota)?;
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
