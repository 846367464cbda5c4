//! Route configuration and setup.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{get_thumbnail, upload_thumbnail};
use crate::state::AppState;
use vidlet_core::{Config, StorageBackend};

/// Slack on top of the payload bound for multipart framing, so the handler's
/// own size tally decides the outcome rather than a transport-level reject.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/videos/{video_id}/thumbnail",
            post(upload_thumbnail).layer(DefaultBodyLimit::max(
                config.max_upload_size_bytes + UPLOAD_OVERHEAD_BYTES,
            )),
        )
        .route("/api/thumbnails/{video_id}", get(get_thumbnail));

    // Filesystem mode serves derived locators directly from the assets root.
    if config.storage_backend == StorageBackend::Local {
        app = app.nest_service("/assets", ServeDir::new(&config.assets_root));
    }

    Ok(app
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = if config.cors_origins.contains(&"*".to_string()) {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any)
    };
    Ok(cors)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "storage_backend": state.storage.backend_type().to_string(),
    }))
}
