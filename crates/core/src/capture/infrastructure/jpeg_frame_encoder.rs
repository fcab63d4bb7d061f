use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::capture::domain::frame_encoder::{CaptureError, FrameEncoder};
use crate::enrollment::domain::enrollment_config::EnrollmentConfig;
use crate::shared::constants::JPEG_QUALITY;
use crate::shared::frame::Frame;

/// Encodes frames as baseline JPEG using the `image` crate.
///
/// Alpha is dropped from RGBA frames since JPEG has no alpha channel.
pub struct JpegFrameEncoder {
    quality: u8,
}

impl JpegFrameEncoder {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegFrameEncoder {
    fn default() -> Self {
        Self::new(JPEG_QUALITY)
    }
}

impl From<&EnrollmentConfig> for JpegFrameEncoder {
    fn from(config: &EnrollmentConfig) -> Self {
        Self::new(config.jpeg_quality)
    }
}

impl FrameEncoder for JpegFrameEncoder {
    fn encode(&self, frame: &Frame) -> Result<Vec<u8>, CaptureError> {
        let (pixels, color) = match frame.channels() {
            1 => (frame.data().to_vec(), ExtendedColorType::L8),
            3 => (frame.data().to_vec(), ExtendedColorType::Rgb8),
            4 => (strip_alpha(frame.data()), ExtendedColorType::Rgb8),
            channels => return Err(CaptureError::InvalidFrame { channels }),
        };

        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, self.quality).encode(
            &pixels,
            frame.width(),
            frame.height(),
            color,
        )?;
        Ok(out)
    }
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    rgba.chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect()
}
