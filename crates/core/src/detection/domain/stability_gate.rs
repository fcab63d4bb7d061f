use std::collections::VecDeque;

use crate::detection::domain::face_features::FaceFeatures;
use crate::shared::constants::{STABILITY_TOLERANCE, STABILITY_WINDOW};

/// Rejects detections whose size profile departs from recent history.
///
/// A sudden jump in face width, height or eye span relative to the
/// moving average means the detector switched to another person or
/// produced noise; either way enrollment must restart.
pub struct StabilityGate {
    capacity: usize,
    tolerance: f64,
    window: VecDeque<FaceFeatures>,
    last_accepted: Option<FaceFeatures>,
}

impl StabilityGate {
    pub fn new(capacity: usize, tolerance: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            tolerance,
            window: VecDeque::with_capacity(capacity),
            last_accepted: None,
        }
    }

    /// Judges `features` against the window, then appends them.
    ///
    /// Always accepts until the window is full and something has been
    /// accepted before. The mean covers history only, not `features`.
    pub fn evaluate(&mut self, features: &FaceFeatures) -> bool {
        let accept = match (&self.last_accepted, self.window.len() >= self.capacity) {
            (Some(_), true) => self.is_consistent(features),
            _ => true,
        };

        if self.window.len() >= self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(*features);

        if accept {
            self.last_accepted = Some(*features);
        }
        accept
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.last_accepted = None;
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn last_accepted(&self) -> Option<&FaceFeatures> {
        self.last_accepted.as_ref()
    }

    fn is_consistent(&self, current: &FaceFeatures) -> bool {
        let n = self.window.len() as f64;
        let (width, height, eyes) = self.window.iter().fold((0.0, 0.0, 0.0), |acc, f| {
            (acc.0 + f.face_width, acc.1 + f.face_height, acc.2 + f.eye_distance)
        });

        relative_deviation(current.face_width, width / n) < self.tolerance
            && relative_deviation(current.face_height, height / n) < self.tolerance
            && relative_deviation(current.eye_distance, eyes / n) < self.tolerance
    }
}

impl Default for StabilityGate {
    fn default() -> Self {
        Self::new(STABILITY_WINDOW, STABILITY_TOLERANCE)
    }
}

fn relative_deviation(current: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        return if current == 0.0 { 0.0 } else { f64::INFINITY };
    }
    (current - mean).abs() / mean.abs()
}
