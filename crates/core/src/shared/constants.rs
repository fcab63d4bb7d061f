/// Continuous time a pose must be held before the step advances.
pub const DWELL_MS: u64 = 3000;

/// Number of recent feature vectors the stability gate averages over.
pub const STABILITY_WINDOW: usize = 10;

/// Max relative deviation from the window mean before a detection is
/// treated as a different face.
pub const STABILITY_TOLERANCE: f64 = 0.15;

/// Nose offset (relative to face width) beyond which the head counts as turned.
pub const ORIENTATION_THRESHOLD: f64 = 0.1;

/// JPEG quality for captured frames (1-100).
pub const JPEG_QUALITY: u8 = 90;

pub const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

pub const SAVE_FACE_PATH: &str = "/save-face";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
