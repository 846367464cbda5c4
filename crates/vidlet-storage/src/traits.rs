//! Storage abstraction trait
//!
//! This module defines the Storage trait that both backends implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;
use vidlet_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("No thumbnail stored for {0}")]
    NotFound(Uuid),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A retrieved blob with its content type.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub content_type: String,
    pub data: Bytes,
}

/// Storage abstraction trait
///
/// A failed `persist` means "no valid asset": partial writes are not
/// cleaned up automatically and the caller must not publish a locator.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist the blob for a record, replacing any previous blob for that
    /// record entirely. Returns the externally reachable locator.
    async fn persist(
        &self,
        video_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String>;

    /// Retrieve the current blob for a record.
    async fn retrieve(&self, video_id: Uuid) -> StorageResult<StoredBlob>;

    /// Check whether a blob exists for a record.
    async fn exists(&self, video_id: Uuid) -> StorageResult<bool>;

    /// Delete the blob for a record. Deleting a missing blob is not an error.
    async fn delete(&self, video_id: Uuid) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
