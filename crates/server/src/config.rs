//! Server configuration.

use std::path::PathBuf;

/// Request bodies carry a base64 camera frame; 10 MiB fits a 1080p JPEG
/// with plenty of headroom.
pub const DEFAULT_MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory enrolled faces are written to, created at startup.
    pub faces_dir: PathBuf,
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            faces_dir: PathBuf::from("faces"),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
        }
    }
}
