//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::TokenVerifier;
use vidlet_core::Config;
use vidlet_db::VideoStore;
use vidlet_storage::Storage;

/// Application state: configuration plus the collaborator seams. All three
/// collaborators are trait objects so deployments (and tests) can swap
/// implementations without touching handler code.
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    pub storage: Arc<dyn Storage>,
    pub verifier: Arc<dyn TokenVerifier>,
}
