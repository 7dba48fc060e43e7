//! Storage port for the vault blob
//!
//! The vault is a single serialized text blob under one well-known key.
//! Implementations only move that blob; parsing lives in the store.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::StorageError;

/// Well-known key the vault blob is stored under
pub const VAULT_KEY: &str = "smartSaveVault";

/// Read/write access to the vault blob
pub trait StoragePort {
    /// The stored blob, or `None` if nothing was ever written
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored blob in full
    fn write(&mut self, blob: &str) -> Result<(), StorageError>;
}

/// In-memory storage, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    blob: Option<String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            quota: None,
        }
    }

    /// Reject writes larger than `bytes`, like a full browser store
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl StoragePort for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.blob.clone())
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            if blob.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    limit,
                    attempted: blob.len(),
                });
            }
        }
        self.blob = Some(blob.to_string());
        Ok(())
    }
}

/// Blob stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `<dir>/smartSaveVault.json`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", VAULT_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| VAULT_KEY.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StoragePort for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(&self.path)?))
    }

    fn write(&mut self, blob: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write aside then rename so readers never see a half-written blob
        let temp = self.temp_path();
        fs::write(&temp, blob)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            if let Err(cleanup) = fs::remove_file(&temp) {
                warn!("Unable to remove {}: {}", temp.display(), cleanup);
            }
            return Err(e.into());
        }

        debug!("Wrote {} bytes to {}", blob.len(), self.path.display());
        Ok(())
    }
}
