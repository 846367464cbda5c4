use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;
use vidlet_core::AppError;

/// Serve the stored thumbnail blob for a video.
///
/// The retrieval surface for the in-memory backend; works for the filesystem
/// backend too. 404 when no thumbnail has been uploaded.
#[tracing::instrument(skip(state), fields(video_id = %video_id_raw, operation = "get_thumbnail"))]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id_raw): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id_raw)
        .map_err(|_| AppError::InvalidInput(format!("Invalid video ID: {}", video_id_raw)))?;

    let blob = state.storage.retrieve(video_id).await?;

    Ok(([(CONTENT_TYPE, blob.content_type)], blob.data).into_response())
}
