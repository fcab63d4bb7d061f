use std::fmt;

use crate::detection::domain::orientation::Orientation;

/// Ordered enrollment progress: left turn, right turn, frontal hold, done.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EnrollmentStep {
    #[default]
    LeftFace,
    RightFace,
    FrontFace,
    Done,
}

impl EnrollmentStep {
    /// Pose that must be held to complete this step; `None` once done.
    pub fn required_orientation(self) -> Option<Orientation> {
        match self {
            EnrollmentStep::LeftFace => Some(Orientation::Left),
            EnrollmentStep::RightFace => Some(Orientation::Right),
            EnrollmentStep::FrontFace => Some(Orientation::Front),
            EnrollmentStep::Done => None,
        }
    }

    /// `Done` is absorbing.
    pub fn next(self) -> Self {
        match self {
            EnrollmentStep::LeftFace => EnrollmentStep::RightFace,
            EnrollmentStep::RightFace => EnrollmentStep::FrontFace,
            EnrollmentStep::FrontFace | EnrollmentStep::Done => EnrollmentStep::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == EnrollmentStep::Done
    }
}

impl fmt::Display for EnrollmentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStep::LeftFace => write!(f, "left face"),
            EnrollmentStep::RightFace => write!(f, "right face"),
            EnrollmentStep::FrontFace => write!(f, "front face"),
            EnrollmentStep::Done => write!(f, "done"),
        }
    }
}
