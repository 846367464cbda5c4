//! File name and extension derivation.
//!
//! Centralized here so both backends and the API stay consistent: a blob is
//! addressed as `{video_id}.{extension}` where the extension is the subtype
//! portion of the declared content type (`image/jpeg` -> `jpeg`).

use uuid::Uuid;

/// Extension for a content type: the subtype after the `/`.
///
/// The subtype must be alphanumeric so derived file names can never escape
/// the storage root.
pub fn extension_for(content_type: &str) -> Option<&str> {
    let (kind, subtype) = content_type.split_once('/')?;
    if kind.is_empty() || subtype.is_empty() {
        return None;
    }
    if !subtype.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(subtype)
}

/// Content type reconstructed from a stored file's extension.
pub fn content_type_for_extension(extension: &str) -> String {
    format!("image/{}", extension)
}

/// File name for a record's blob.
pub fn thumbnail_filename(video_id: Uuid, content_type: &str) -> Option<String> {
    extension_for(content_type).map(|ext| format!("{}.{}", video_id, ext))
}
