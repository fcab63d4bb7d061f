//! Router assembly.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use faceenroll_core::shared::constants::SAVE_FACE_PATH;

use crate::config::ServerConfig;
use crate::handlers;
use crate::state::AppState;

/// Browsers post from whatever origin serves the capture page.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route(SAVE_FACE_PATH, post(handlers::save_face))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(cors_layer())
        .with_state(state)
}
