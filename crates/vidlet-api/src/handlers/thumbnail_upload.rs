use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::HeaderMap,
    Json,
};
use bytes::{Bytes, BytesMut};
use uuid::Uuid;

use crate::auth::extract_bearer_token;
use crate::error::HttpAppError;
use crate::state::AppState;
use vidlet_core::constants::THUMBNAIL_FIELD;
use vidlet_core::models::VideoResponse;
use vidlet_core::AppError;
use vidlet_db::VideoStoreError;

/// Upload thumbnail handler
///
/// Authenticates the caller, verifies ownership of the video record, persists
/// the image blob through the storage backend, and updates the record's
/// `thumbnail_url` to the derived locator.
///
/// The ownership check runs against freshly loaded record state and always
/// precedes the blob write. If the metadata update fails after a successful
/// blob write, the blob is orphaned: there is no rollback, and the record is
/// left untouched. The next successful upload replaces the orphan.
///
/// # Errors
/// - `AppError::InvalidInput` - malformed video ID (400)
/// - `AppError::Unauthorized` - missing or invalid bearer token (401)
/// - `AppError::NotOwner` - subject is not the record owner (401)
/// - `AppError::MalformedUpload` / `AppError::PayloadTooLarge` - multipart
///   parse failure, missing `thumbnail` part, or size bound exceeded (424)
/// - `AppError::UnsupportedMediaType` - content type outside the allow-list (400)
/// - `AppError::StoreRead` / `AppError::StoreWrite` - record store failure (500)
/// - `AppError::AssetPersist` - storage write failure (400)
#[tracing::instrument(
    skip(state, headers, multipart),
    fields(video_id = %video_id_raw, operation = "upload_thumbnail")
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id_raw): Path<String>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id_raw)
        .map_err(|_| AppError::InvalidInput(format!("Invalid video ID: {}", video_id_raw)))?;

    let token = extract_bearer_token(&headers)?;
    let subject_id = state.verifier.verify(token)?;

    tracing::info!(%video_id, %subject_id, "Uploading thumbnail");

    let (content_type, data) =
        read_thumbnail_part(multipart, state.config.max_upload_size_bytes).await?;

    if !state
        .config
        .allowed_content_types
        .iter()
        .any(|allowed| allowed == &content_type)
    {
        return Err(AppError::UnsupportedMediaType(format!(
            "Content type '{}' is not allowed",
            content_type
        ))
        .into());
    }

    // Fresh load per request: ownership is never cached across requests.
    let mut video = state.videos.get(video_id).await.map_err(|e| match e {
        VideoStoreError::NotFound(id) => AppError::StoreRead(format!("Video {} not found", id)),
        VideoStoreError::Backend(msg) => AppError::StoreRead(msg),
    })?;

    if video.owner_id != subject_id {
        return Err(AppError::NotOwner("Subject is not the video owner".to_string()).into());
    }

    let locator = state
        .storage
        .persist(video_id, &content_type, data)
        .await
        .map_err(HttpAppError::from)?;

    video.thumbnail_url = Some(locator.clone());

    let updated = state.videos.update(video).await.map_err(|e| {
        // The blob is already written; without a metadata update it is
        // orphaned until the next successful upload replaces it.
        tracing::warn!(%video_id, locator = %locator, error = %e, "Metadata update failed after blob write; blob orphaned");
        AppError::StoreWrite(e.to_string())
    })?;

    tracing::info!(%video_id, locator = %locator, "Thumbnail upload complete");

    Ok(Json(VideoResponse::from(updated)))
}

/// Parse the multipart body and extract the `thumbnail` file part.
///
/// `max_bytes` bounds the total decoded payload size across all parts.
/// Returns the declared content type (parameters stripped, lowercased)
/// and the buffered bytes.
async fn read_thumbnail_part(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<(String, Bytes), AppError> {
    let mut total_read: usize = 0;
    let mut thumbnail: Option<(String, Bytes)> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::MalformedUpload(format!("Couldn't parse form: {}", e)))?
    {
        let is_thumbnail = field.name() == Some(THUMBNAIL_FIELD);

        let content_type = field
            .content_type()
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase());

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::MalformedUpload(format!("Couldn't read form data: {}", e)))?
        {
            total_read += chunk.len();
            if total_read > max_bytes {
                return Err(AppError::PayloadTooLarge(format!(
                    "Payload exceeds {} bytes",
                    max_bytes
                )));
            }
            if is_thumbnail {
                buffer.extend_from_slice(&chunk);
            }
        }

        if is_thumbnail {
            let content_type = content_type.ok_or_else(|| {
                AppError::MalformedUpload("Missing content type on 'thumbnail' part".to_string())
            })?;
            thumbnail = Some((content_type, buffer.freeze()));
        }
    }

    thumbnail
        .ok_or_else(|| AppError::MalformedUpload("Missing 'thumbnail' file part".to_string()))
}
