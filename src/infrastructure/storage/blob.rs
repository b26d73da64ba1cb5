//! Blob store contract and in-memory implementation

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Store for raw uploaded files, addressed by owner-namespaced paths
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under `path`, rejecting overwrites. Returns the stored path.
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<String, DomainError>;

    /// Delete the blob at `path`
    async fn delete(&self, path: &str) -> Result<(), DomainError>;
}

/// Thread-safe in-memory blob store
///
/// Useful for testing and development. Data is lost when the process
/// terminates.
#[derive(Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs
    pub fn len(&self) -> usize {
        self.blobs.read().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check whether a blob exists at `path`
    pub fn contains(&self, path: &str) -> bool {
        self.blobs
            .read()
            .map(|b| b.contains_key(path))
            .unwrap_or(false)
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> Result<String, DomainError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        if blobs.contains_key(path) {
            return Err(DomainError::conflict(format!(
                "Blob already exists at '{}'",
                path
            )));
        }

        blobs.insert(path.to_string(), bytes.to_vec());
        Ok(path.to_string())
    }

    async fn delete(&self, path: &str) -> Result<(), DomainError> {
        let mut blobs = self
            .blobs
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        blobs.remove(path);
        Ok(())
    }
}
