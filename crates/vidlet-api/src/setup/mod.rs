//! Application setup: state construction, routes, server.

pub mod routes;
pub mod server;

use std::sync::Arc;

use crate::auth::{JwtVerifier, TokenVerifier};
use crate::state::AppState;
use axum::Router;
use vidlet_core::Config;
use vidlet_db::{InMemoryVideoStore, VideoStore};
use vidlet_storage::create_storage;

/// Build the application state and router from configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let storage = create_storage(&config).await?;
    let videos: Arc<dyn VideoStore> = Arc::new(InMemoryVideoStore::new());
    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtVerifier::new(config.jwt_secret.clone()));

    tracing::info!(
        storage_backend = %config.storage_backend,
        max_upload_bytes = config.max_upload_size_bytes,
        allowed_content_types = %config.allowed_content_types.join(","),
        "Application initialized"
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        videos,
        storage,
        verifier,
    });

    let router = routes::setup_routes(&config, state.clone())?;
    Ok((state, router))
}
