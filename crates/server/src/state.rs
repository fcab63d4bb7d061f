//! Application state.

use std::sync::Arc;

use crate::face_store::FaceStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<FaceStore>,
}

impl AppState {
    pub fn new(store: FaceStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
