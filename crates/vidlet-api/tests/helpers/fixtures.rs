//! Payload and record fixtures.

use uuid::Uuid;
use vidlet_api::state::AppState;
use vidlet_core::models::video::Video;
use vidlet_db::VideoStore;

/// Fixed record id so locator assertions can be written out in full.
pub const SEED_VIDEO_ID: &str = "11111111-1111-1111-1111-111111111111";

pub fn seed_video_id() -> Uuid {
    Uuid::parse_str(SEED_VIDEO_ID).unwrap()
}

/// Insert a video with no thumbnail, owned by `owner_id`.
pub async fn seed_video(state: &AppState, id: Uuid, owner_id: Uuid) -> Video {
    let mut video = Video::new(owner_id, "Launch teaser");
    video.id = id;
    state
        .videos
        .insert(video)
        .await
        .expect("Failed to seed video")
}

/// A JPEG-looking payload of the requested size (SOI marker plus padding).
pub fn jpeg_payload(len: usize) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0];
    if data.len() < len {
        data.resize(len, 0x42);
    }
    data
}

/// A PNG-looking payload (8-byte signature plus padding).
pub fn png_payload(len: usize) -> Vec<u8> {
    let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    if data.len() < len {
        data.resize(len, 0x24);
    }
    data
}
