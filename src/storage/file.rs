//! File Medium
//!
//! Persists each key as one file under a base directory, so the cache
//! survives process restarts.

use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::storage::{check_quota, DurableMedium};

/// Directory-backed durable medium.
#[derive(Debug, Clone)]
pub struct FileMedium {
    /// Base directory holding one file per key
    base_dir: PathBuf,
    quota: Option<usize>,
}

impl FileMedium {
    /// Opens (creating if needed) a medium rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let base_dir = base_dir.into();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
            debug!("Created cache storage dir {}", base_dir.display());
        }
        Ok(Self {
            base_dir,
            quota: None,
        })
    }

    /// Rejects values longer than `quota` bytes.
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path for a key. Bytes outside `[A-Za-z0-9_-]` are hex-escaped so
    /// any key maps to a single safe file name.
    fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len() + 5);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                name.push(byte as char);
            } else {
                let _ = write!(name, "%{byte:02x}");
            }
        }
        name.push_str(".json");
        self.base_dir.join(name)
    }
}

impl DurableMedium for FileMedium {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_quota(value.len(), self.quota)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}
