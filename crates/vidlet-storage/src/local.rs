use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult, StoredBlob};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;
use vidlet_core::StorageBackend;

/// Local filesystem storage implementation
///
/// Blobs live directly under the configured root as `{video_id}.{ext}` and
/// are publicly reachable as `{base_url}/assets/{video_id}.{ext}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for thumbnail files (e.g., "./assets")
    /// * `base_url` - Service base address (e.g., "http://localhost:8080")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Public URL for a stored file name
    fn generate_url(&self, filename: &str) -> String {
        format!("{}/assets/{}", self.base_url.trim_end_matches('/'), filename)
    }

    /// All stored files for a record, regardless of extension. More than one
    /// can exist after a crash mid-replacement; callers must not assume a
    /// single entry.
    async fn find_blob_paths(&self, video_id: Uuid) -> StorageResult<Vec<PathBuf>> {
        let stem = video_id.to_string();
        let mut entries = fs::read_dir(&self.base_path).await.map_err(|e| {
            StorageError::ReadFailed(format!(
                "Failed to read storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            let path = entry.path();
            if path.file_stem().and_then(|s| s.to_str()) == Some(stem.as_str()) {
                paths.push(path);
            }
        }

        Ok(paths)
    }

    /// Find the stored file for a record, regardless of extension.
    async fn find_blob_path(&self, video_id: Uuid) -> StorageResult<Option<PathBuf>> {
        Ok(self.find_blob_paths(video_id).await?.into_iter().next())
    }

    /// Remove every stored file for the record except `keep`. A re-upload with
    /// a different content type must not leave the old extension behind:
    /// exactly one live blob exists per record. The full set is collected
    /// before deleting, independent of directory iteration order.
    async fn remove_siblings(&self, video_id: Uuid, keep: &Path) -> StorageResult<()> {
        for path in self.find_blob_paths(video_id).await? {
            if path == keep {
                continue;
            }
            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to delete stale file {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn persist(
        &self,
        video_id: Uuid,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<String> {
        let filename = keys::thumbnail_filename(video_id, content_type)
            .ok_or_else(|| StorageError::UnsupportedContentType(content_type.to_string()))?;
        let path = self.base_path.join(&filename);
        let size = data.len();
        let start = std::time::Instant::now();

        self.remove_siblings(video_id, &path).await?;

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(&filename);

        tracing::info!(
            path = %path.display(),
            video_id = %video_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage persist successful"
        );

        Ok(url)
    }

    async fn retrieve(&self, video_id: Uuid) -> StorageResult<StoredBlob> {
        let path = self
            .find_blob_path(video_id)
            .await?
            .ok_or(StorageError::NotFound(video_id))?;

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(StorageError::NotFound(video_id))?;

        Ok(StoredBlob {
            content_type: keys::content_type_for_extension(extension),
            data: Bytes::from(data),
        })
    }

    async fn exists(&self, video_id: Uuid) -> StorageResult<bool> {
        Ok(self.find_blob_path(video_id).await?.is_some())
    }

    async fn delete(&self, video_id: Uuid) -> StorageResult<()> {
        for path in self.find_blob_paths(video_id).await? {
            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to delete file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            tracing::info!(
                path = %path.display(),
                video_id = %video_id,
                "Local storage delete successful"
            );
        }
        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
