//! Compact per-frame face descriptor derived from box + landmarks.
//!
//! Nose offset and eye span are normalized by face width so they stay
//! comparable as the user moves toward or away from the camera.

use thiserror::Error;

use crate::shared::detection::{Detection, LEFT_EYE, NOSE, RIGHT_EYE};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("detection has {found} landmarks, need at least 3 (left eye, right eye, nose)")]
    MissingLandmarks { found: usize },
    #[error("degenerate face box {width}x{height}")]
    DegenerateBox { width: f64, height: f64 },
    #[error("landmark {index} has non-finite coordinates")]
    NonFiniteLandmark { index: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceFeatures {
    /// Nose x offset from the eye midpoint, as a fraction of face width.
    pub relative_nose_position: f64,
    pub face_width: f64,
    pub face_height: f64,
    /// Horizontal eye span as a fraction of face width.
    pub eye_distance: f64,
}

impl FaceFeatures {
    pub fn extract(detection: &Detection) -> Result<Self, FeatureError> {
        let found = detection.landmarks.len();
        if found <= NOSE {
            return Err(FeatureError::MissingLandmarks { found });
        }

        let face_width = detection.width();
        let face_height = detection.height();
        if !(face_width > 0.0 && face_height > 0.0 && face_width.is_finite() && face_height.is_finite())
        {
            return Err(FeatureError::DegenerateBox {
                width: face_width,
                height: face_height,
            });
        }

        if let Some(index) = [LEFT_EYE, RIGHT_EYE, NOSE]
            .into_iter()
            .find(|&i| !(detection.landmarks[i].0.is_finite() && detection.landmarks[i].1.is_finite()))
        {
            return Err(FeatureError::NonFiniteLandmark { index });
        }

        let left_eye = detection.landmarks[LEFT_EYE];
        let right_eye = detection.landmarks[RIGHT_EYE];
        let nose = detection.landmarks[NOSE];

        let midpoint_eyes = (left_eye.0 + right_eye.0) / 2.0;
        let features = Self {
            relative_nose_position: (nose.0 - midpoint_eyes) / face_width,
            face_width,
            face_height,
            eye_distance: (right_eye.0 - left_eye.0).abs() / face_width,
        };

        if !features.is_finite() {
            return Err(FeatureError::DegenerateBox {
                width: face_width,
                height: face_height,
            });
        }
        Ok(features)
    }

    fn is_finite(&self) -> bool {
        self.relative_nose_position.is_finite() && self.eye_distance.is_finite()
    }
}
