use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("capture is not enabled: complete enrollment and face the camera")]
    NotEnabled,
    #[error("cannot encode frame with {channels} channels")]
    InvalidFrame { channels: u8 },
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// Turns a raw frame into an uploadable still image.
pub trait FrameEncoder: Send + Sync {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>, CaptureError>;
}
