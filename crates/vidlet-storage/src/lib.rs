//! Vidlet Storage Library
//!
//! Blob storage abstraction and implementations for thumbnail assets.
//! Both backends satisfy the same `Storage` contract so the upload
//! handler is agnostic to the backing choice:
//!
//! - **Local**: one file per record under a configured root, named
//!   `{video_id}.{extension}` where the extension is the subtype of the
//!   declared content type.
//! - **Memory**: a process-wide map keyed by record ID. Volatile: content
//!   does not survive a restart and is not shared across instances.
//!
//! `persist` is idempotent: re-invoking it for the same record ID fully
//! replaces the previous blob.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredBlob};
pub use vidlet_core::StorageBackend;
