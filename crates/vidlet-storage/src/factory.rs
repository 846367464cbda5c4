use crate::{LocalStorage, MemoryStorage, Storage, StorageResult};
use std::sync::Arc;
use vidlet_core::{Config, StorageBackend};

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let storage = LocalStorage::new(config.assets_root.clone(), config.base_url()).await?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new(config.base_url()))),
    }
}
