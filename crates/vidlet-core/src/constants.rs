//! Shared constants.

/// Multipart field name carrying the thumbnail file.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Default upper bound on decoded thumbnail payload size.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
