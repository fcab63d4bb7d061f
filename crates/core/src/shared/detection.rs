use serde::{Deserialize, Serialize};

pub const LEFT_EYE: usize = 0;
pub const RIGHT_EYE: usize = 1;
pub const NOSE: usize = 2;

/// Pixel coordinate `(x, y)` in the unmirrored camera frame.
pub type Point = (f64, f64);

/// One face as reported by the detection model for a single frame.
///
/// Landmarks follow the BlazeFace ordering: left eye, right eye, nose,
/// then any further points (mouth, ears) which the enrollment flow ignores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub top_left: Point,
    pub bottom_right: Point,
    pub landmarks: Vec<Point>,
}

impl Detection {
    pub fn new(top_left: Point, bottom_right: Point, landmarks: Vec<Point>) -> Self {
        Self {
            top_left,
            bottom_right,
            landmarks,
        }
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.0 - self.top_left.0
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.1 - self.top_left.1
    }
}
