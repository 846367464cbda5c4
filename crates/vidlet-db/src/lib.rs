//! Vidlet DB Library
//!
//! Record-store access for video metadata. The store is an external
//! collaborator to the upload pipeline, so it is abstracted behind the
//! [`VideoStore`] trait; [`InMemoryVideoStore`] is the process-local
//! implementation used by the service and its tests. A database-backed
//! implementation plugs in behind the same trait.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;
use vidlet_core::models::Video;

/// Record store operation errors
#[derive(Debug, Error)]
pub enum VideoStoreError {
    #[error("Video not found: {0}")]
    NotFound(Uuid),

    #[error("Store backend error: {0}")]
    Backend(String),
}

pub type VideoStoreResult<T> = Result<T, VideoStoreError>;

/// Keyed lookup and write of video metadata.
///
/// `update` is all-or-nothing from the store's perspective: either the whole
/// record is replaced or nothing changes. No conditional (versioned) update
/// is required by the upload pipeline; last write wins.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Load a record by ID.
    async fn get(&self, id: Uuid) -> VideoStoreResult<Video>;

    /// Replace an existing record, refreshing `updated_at`.
    async fn update(&self, video: Video) -> VideoStoreResult<Video>;

    /// Insert a new record. Used by record-creation surfaces and test setup.
    async fn insert(&self, video: Video) -> VideoStoreResult<Video>;
}

/// Process-local record store backed by a keyed map.
#[derive(Clone, Default)]
pub struct InMemoryVideoStore {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn get(&self, id: Uuid) -> VideoStoreResult<Video> {
        let videos = self.videos.read().await;
        videos.get(&id).cloned().ok_or(VideoStoreError::NotFound(id))
    }

    async fn update(&self, mut video: Video) -> VideoStoreResult<Video> {
        let mut videos = self.videos.write().await;
        if !videos.contains_key(&video.id) {
            return Err(VideoStoreError::NotFound(video.id));
        }
        video.updated_at = Utc::now();
        videos.insert(video.id, video.clone());
        Ok(video)
    }

    async fn insert(&self, video: Video) -> VideoStoreResult<Video> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(VideoStoreError::Backend(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(video)
    }
}
