//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p vidlet-api --test thumbnails_test`.

pub mod auth;
pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;
use vidlet_api::auth::{JwtVerifier, TokenVerifier};
use vidlet_api::setup::routes::setup_routes;
use vidlet_api::state::AppState;
use uuid::Uuid;
use vidlet_core::constants::DEFAULT_MAX_UPLOAD_BYTES;
use vidlet_core::models::Video;
use vidlet_core::{Config, StorageBackend};
use vidlet_db::{InMemoryVideoStore, VideoStore, VideoStoreError, VideoStoreResult};
use vidlet_storage::{LocalStorage, MemoryStorage, Storage};

/// Test application: server, shared state, and the owned assets root.
pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Filesystem storage root (empty unless an upload succeeded).
    pub fn assets_root(&self) -> &Path {
        self._temp_dir.path()
    }
}

fn test_config(backend: StorageBackend, assets_root: &Path, max_upload: usize) -> Config {
    Config {
        server_port: 8080,
        public_host: "localhost".to_string(),
        cors_origins: vec!["*".to_string()],
        jwt_secret: auth::TEST_JWT_SECRET.to_string(),
        environment: "test".to_string(),
        storage_backend: backend,
        assets_root: assets_root.to_string_lossy().into_owned(),
        max_upload_size_bytes: max_upload,
        allowed_content_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        request_timeout_secs: 30,
    }
}

/// Setup a test app with the filesystem backend and the default size bound.
pub async fn setup_test_app() -> TestApp {
    setup_app(StorageBackend::Local, DEFAULT_MAX_UPLOAD_BYTES).await
}

/// Setup a test app with the in-memory backend.
pub async fn setup_memory_test_app() -> TestApp {
    setup_app(StorageBackend::Memory, DEFAULT_MAX_UPLOAD_BYTES).await
}

/// Setup a test app with a custom payload size bound.
pub async fn setup_test_app_with_max_upload(max_upload: usize) -> TestApp {
    setup_app(StorageBackend::Local, max_upload).await
}

/// Setup a test app over the filesystem backend with a caller-provided
/// record store.
pub async fn setup_test_app_with_videos(videos: Arc<dyn VideoStore>) -> TestApp {
    setup_app_with(StorageBackend::Local, DEFAULT_MAX_UPLOAD_BYTES, videos).await
}

async fn setup_app(backend: StorageBackend, max_upload: usize) -> TestApp {
    setup_app_with(backend, max_upload, Arc::new(InMemoryVideoStore::new())).await
}

async fn setup_app_with(
    backend: StorageBackend,
    max_upload: usize,
    videos: Arc<dyn VideoStore>,
) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = test_config(backend, temp_dir.path(), max_upload);

    let storage: Arc<dyn Storage> = match backend {
        StorageBackend::Local => Arc::new(
            LocalStorage::new(temp_dir.path(), config.base_url())
                .await
                .expect("Failed to create local storage"),
        ),
        StorageBackend::Memory => Arc::new(MemoryStorage::new(config.base_url())),
    };
    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtVerifier::new(config.jwt_secret.clone()));

    let state = Arc::new(AppState {
        config: config.clone(),
        videos,
        storage,
        verifier,
    });

    let router = setup_routes(&config, state.clone()).expect("Failed to build router");
    let server = TestServer::new(router).expect("Failed to start test server");

    TestApp {
        server,
        state,
        _temp_dir: temp_dir,
    }
}

/// Record store double whose writes always fail. Reads and seeding delegate
/// to an in-process store, so handlers reach the update step normally.
#[derive(Default)]
pub struct FailingUpdateStore {
    inner: InMemoryVideoStore,
}

impl FailingUpdateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl VideoStore for FailingUpdateStore {
    async fn get(&self, id: Uuid) -> VideoStoreResult<Video> {
        self.inner.get(id).await
    }

    async fn update(&self, _video: Video) -> VideoStoreResult<Video> {
        Err(VideoStoreError::Backend("write conflict".to_string()))
    }

    async fn insert(&self, video: Video) -> VideoStoreResult<Video> {
        self.inner.insert(video).await
    }
}
