pub mod thumbnail_get;
pub mod thumbnail_upload;

pub use thumbnail_get::get_thumbnail;
pub use thumbnail_upload::upload_thumbnail;
