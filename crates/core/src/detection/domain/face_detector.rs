use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Domain interface for the face-detection model.
///
/// The first detection returned is treated as the primary face; an empty
/// result means no face is in view. Implementations may be stateful,
/// hence `&mut self`.
pub trait FaceDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>>;
}
