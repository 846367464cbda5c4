use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use vidlet_core::StorageBackend;

/// In-memory storage implementation
///
/// A process-wide map keyed by record ID, owned by the service process and
/// injected at construction. Volatile: content does not survive a restart
/// and is not shared across concurrent service instances. Locators point at
/// the retrieval endpoint, `{base_url}/api/thumbnails/{video_id}`.
#[derive(Clone)]
pub struct MemoryStorage {
    blobs: Arc<RwLock<HashMap<Uuid, StoredBlob>>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(base_url: String) -> Self {
        MemoryStorage {
            blobs: Arc::new(RwLock::new(HashMap::new())),
            base_url,
        }
    }

    fn generate_url(&self, video_id: Uuid) -> String {
        format!(
            "{}/api/thumbnails/{}",
            self.base_url.trim_end_matches('/'),
            video_id
        )
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn persist(
        &self,
        video_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        // Same content-type discipline as the filesystem backend.
        keys::extension_for(content_type)
            .ok_or_else(|| StorageError::UnsupportedContentType(content_type.to_string()))?;

        let size = data.len();
        let mut blobs = self.blobs.write().await;
        blobs.insert(
            video_id,
            StoredBlob {
                content_type: content_type.to_string(),
                data,
            },
        );

        tracing::info!(
            video_id = %video_id,
            size_bytes = size,
            "Memory storage persist successful"
        );

        Ok(self.generate_url(video_id))
    }

    async fn retrieve(&self, video_id: Uuid) -> StorageResult<StoredBlob> {
        let blobs = self.blobs.read().await;
        blobs
            .get(&video_id)
            .cloned()
            .ok_or(StorageError::NotFound(video_id))
    }

    async fn exists(&self, video_id: Uuid) -> StorageResult<bool> {
        Ok(self.blobs.read().await.contains_key(&video_id))
    }

    async fn delete(&self, video_id: Uuid) -> StorageResult<()> {
        self.blobs.write().await.remove(&video_id);
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_URL: &str = "http://localhost:8080";

    #[tokio::test]
    async fn test_persist_returns_retrieval_locator() {
        let storage = MemoryStorage::new(BASE_URL.to_string());
        let id: Uuid = "11111111-1111-1111-1111-111111111111".parse().unwrap();

        let url = storage
            .persist(id, "image/png", Bytes::from_static(b"png bytes"))
            .await
            .unwrap();

        assert_eq!(
            url,
            "http://localhost:8080/api/thumbnails/11111111-1111-1111-1111-111111111111"
        );
    }

    #[tokio::test]
    async fn test_persist_overwrites_previous_blob() {
        let storage = MemoryStorage::new(BASE_URL.to_string());
        let id = Uuid::new_v4();

        storage
            .persist(id, "image/jpeg", Bytes::from_static(b"first"))
            .await
            .unwrap();
        storage
            .persist(id, "image/png", Bytes::from_static(b"second"))
            .await
            .unwrap();

        let blob = storage.retrieve(id).await.unwrap();
        assert_eq!(blob.content_type, "image/png");
        assert_eq!(&blob.data[..], b"second");
    }

    #[tokio::test]
    async fn test_retrieve_missing_blob() {
        let storage = MemoryStorage::new(BASE_URL.to_string());
        let result = storage.retrieve(Uuid::new_v4()).await;
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_then_exists() {
        let storage = MemoryStorage::new(BASE_URL.to_string());
        let id = Uuid::new_v4();

        storage
            .persist(id, "image/jpeg", Bytes::from_static(b"x"))
            .await
            .unwrap();
        assert!(storage.exists(id).await.unwrap());

        storage.delete(id).await.unwrap();
        assert!(!storage.exists(id).await.unwrap());
        storage.delete(id).await.unwrap();
    }
}
