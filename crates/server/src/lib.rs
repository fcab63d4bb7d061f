//! HTTP backend that persists enrolled face captures.

pub mod config;
pub mod error;
pub mod face_store;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use face_store::FaceStore;
pub use routes::create_router;
pub use state::AppState;
