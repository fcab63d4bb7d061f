use std::fmt;

use crate::detection::domain::face_features::FaceFeatures;

/// Coarse head pose derived from the nose offset.
///
/// Sign convention is raw image space (x grows to the right in the
/// unmirrored camera frame): a nose left of the eye midpoint is `Left`.
/// Mirrored previews show the user turning the other way on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    Left,
    Right,
    Front,
}

impl Orientation {
    pub fn classify(features: &FaceFeatures, threshold: f64) -> Self {
        let offset = features.relative_nose_position;
        if offset < -threshold {
            Orientation::Left
        } else if offset > threshold {
            Orientation::Right
        } else {
            Orientation::Front
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Left => write!(f, "Left Face"),
            Orientation::Right => write!(f, "Right Face"),
            Orientation::Front => write!(f, "Front Face"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::ORIENTATION_THRESHOLD;
    use rstest::rstest;

    fn features(offset: f64) -> FaceFeatures {
        FaceFeatures {
            relative_nose_position: offset,
            face_width: 200.0,
            face_height: 240.0,
            eye_distance: 0.4,
        }
    }

    #[rstest]
    #[case::far_left(-0.4, Orientation::Left)]
    #[case::just_left(-0.1001, Orientation::Left)]
    #[case::left_boundary(-0.1, Orientation::Front)]
    #[case::center(0.0, Orientation::Front)]
    #[case::right_boundary(0.1, Orientation::Front)]
    #[case::just_right(0.1001, Orientation::Right)]
    #[case::far_right(0.4, Orientation::Right)]
    fn test_classify(#[case] offset: f64, #[case] expected: Orientation) {
        assert_eq!(
            Orientation::classify(&features(offset), ORIENTATION_THRESHOLD),
            expected
        );
    }

    #[test]
    fn test_classify_is_idempotent() {
        let f = features(-0.25);
        let first = Orientation::classify(&f, ORIENTATION_THRESHOLD);
        let second = Orientation::classify(&f, ORIENTATION_THRESHOLD);
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(Orientation::Left.to_string(), "Left Face");
        assert_eq!(Orientation::Right.to_string(), "Right Face");
        assert_eq!(Orientation::Front.to_string(), "Front Face");
    }
}
