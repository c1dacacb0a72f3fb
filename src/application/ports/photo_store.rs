use async_trait::async_trait;
use bytes::Bytes;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::value_objects::{PhotoNamespace, PhotoPath};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for photo blob storage with public URL resolution
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Store bytes under a freshly generated name inside `namespace`
    async fn put(
        &self,
        bytes: Bytes,
        namespace: &PhotoNamespace,
        extension: &str,
    ) -> Result<PhotoPath, StorageError>;

    /// Remove a blob. Removing a blob that is already gone succeeds.
    async fn delete(&self, path: &PhotoPath) -> Result<(), StorageError>;

    /// Check if blob exists
    async fn exists(&self, path: &PhotoPath) -> Result<bool, StorageError>;

    /// Publicly fetchable URL of a blob
    fn resolve(&self, path: &PhotoPath) -> String;

    /// Verify the backend is reachable and writable
    async fn health_check(&self) -> Result<(), StorageError>;
}
