use std::fmt;

use crate::enrollment::domain::enrollment_step::EnrollmentStep;

/// User-facing guidance shown beneath the camera preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    NoFace,
    TurnLeft,
    TurnRight,
    FaceFront,
    HoldStill,
    /// Shown when a dwell completes and the next step begins.
    StepComplete(EnrollmentStep),
    Registered,
    ReturnToFront,
    Saving,
    Saved,
    SaveFailed,
}

impl StatusMessage {
    /// Prompt for a step whose required pose is not currently held.
    pub fn prompt_for(step: EnrollmentStep) -> Self {
        match step {
            EnrollmentStep::LeftFace => StatusMessage::TurnLeft,
            EnrollmentStep::RightFace => StatusMessage::TurnRight,
            EnrollmentStep::FrontFace => StatusMessage::FaceFront,
            EnrollmentStep::Done => StatusMessage::ReturnToFront,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StatusMessage::NoFace => "No face detected",
            StatusMessage::TurnLeft => "Please turn your face to the left.",
            StatusMessage::TurnRight => "Please turn your face to the right.",
            StatusMessage::FaceFront => "Please look straight at the camera.",
            StatusMessage::HoldStill => "Hold still for a moment.",
            StatusMessage::StepComplete(EnrollmentStep::RightFace) => {
                "Got it. Now turn your face to the right."
            }
            StatusMessage::StepComplete(EnrollmentStep::FrontFace) => {
                "Got it. Now look straight at the camera."
            }
            StatusMessage::StepComplete(_) => "Face confirmed.",
            StatusMessage::Registered => "Registered successfully!",
            StatusMessage::ReturnToFront => "Please look straight at the camera again.",
            StatusMessage::Saving => "Saving face...",
            StatusMessage::Saved => "Face saved successfully!",
            StatusMessage::SaveFailed => "Failed to save face.",
        };
        f.write_str(text)
    }
}
