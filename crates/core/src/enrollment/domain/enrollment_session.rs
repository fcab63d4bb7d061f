//! Pose-guidance state machine for one camera feed.
//!
//! Each frame's primary detection is reduced to features, checked against
//! recent history by the stability gate, classified into a head pose and
//! then fed to the step logic. A step completes only after its pose has
//! been held without interruption for the dwell time; losing the face or
//! switching to a different one restarts enrollment from the left turn.

use std::time::Duration;

use crate::capture::domain::frame_encoder::{CaptureError, FrameEncoder};
use crate::detection::domain::face_features::FaceFeatures;
use crate::detection::domain::orientation::Orientation;
use crate::detection::domain::stability_gate::StabilityGate;
use crate::enrollment::domain::dwell_timer::DwellTimer;
use crate::enrollment::domain::enrollment_config::EnrollmentConfig;
use crate::enrollment::domain::enrollment_step::EnrollmentStep;
use crate::enrollment::domain::status_message::StatusMessage;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetReason {
    NoFace,
    Unstable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnrollmentEvent {
    StepCompleted {
        from: EnrollmentStep,
        to: EnrollmentStep,
    },
    Reset(ResetReason),
}

/// Result of evaluating one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOutcome {
    pub step: EnrollmentStep,
    /// `None` when no usable face was seen this frame.
    pub orientation: Option<Orientation>,
    pub status: StatusMessage,
    pub capture_enabled: bool,
    pub events: Vec<EnrollmentEvent>,
    /// The detection was malformed and the frame left state untouched.
    pub skipped: bool,
}

pub struct EnrollmentSession {
    config: EnrollmentConfig,
    step: EnrollmentStep,
    gate: StabilityGate,
    timer: DwellTimer,
    capture_enabled: bool,
    status: StatusMessage,
}

impl EnrollmentSession {
    pub fn new(config: EnrollmentConfig) -> Self {
        let gate = StabilityGate::new(config.stability_window, config.stability_tolerance);
        let timer = DwellTimer::new(config.dwell());
        Self {
            config,
            step: EnrollmentStep::LeftFace,
            gate,
            timer,
            capture_enabled: false,
            status: StatusMessage::TurnLeft,
        }
    }

    pub fn step(&self) -> EnrollmentStep {
        self.step
    }

    pub fn status(&self) -> StatusMessage {
        self.status
    }

    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    pub fn dwell_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn history_len(&self) -> usize {
        self.gate.len()
    }

    pub fn config(&self) -> &EnrollmentConfig {
        &self.config
    }

    /// Fires the dwell timer if it is due. Called at the start of every
    /// frame, and may be called between frames by a scheduler.
    pub fn tick(&mut self, now: Duration) -> Option<EnrollmentEvent> {
        if !self.timer.fire_if_due(now) {
            return None;
        }

        let from = self.step;
        self.step = from.next();
        self.status = StatusMessage::StepComplete(self.step);
        if self.step.is_done() {
            // The dwell that got us here was a frontal hold.
            self.capture_enabled = true;
            self.status = StatusMessage::Registered;
        }
        log::info!("Enrollment step complete: {from} -> {}", self.step);
        Some(EnrollmentEvent::StepCompleted {
            from,
            to: self.step,
        })
    }

    /// Evaluates the primary detection of one frame (`None` = no face).
    pub fn observe(&mut self, detection: Option<&Detection>, now: Duration) -> FrameOutcome {
        let mut events: Vec<EnrollmentEvent> = self.tick(now).into_iter().collect();

        let Some(detection) = detection else {
            if !self.is_pristine() {
                log::debug!("Face lost, restarting enrollment");
                events.push(EnrollmentEvent::Reset(ResetReason::NoFace));
            }
            self.reset();
            self.status = StatusMessage::NoFace;
            return self.outcome(None, events, false);
        };

        let features = match FaceFeatures::extract(detection) {
            Ok(f) => f,
            Err(e) => {
                log::debug!("Skipping frame: {e}");
                return self.outcome(None, events, true);
            }
        };
        let orientation = Orientation::classify(&features, self.config.orientation_threshold);

        if !self.gate.evaluate(&features) {
            log::warn!("Face changed between frames, restarting enrollment");
            self.reset();
            events.push(EnrollmentEvent::Reset(ResetReason::Unstable));
            return self.outcome(Some(orientation), events, false);
        }

        match self.step.required_orientation() {
            Some(required) if orientation == required => {
                self.timer.start(now);
                self.status = StatusMessage::HoldStill;
            }
            Some(_) => {
                self.timer.cancel();
                self.status = StatusMessage::prompt_for(self.step);
            }
            None => {
                self.capture_enabled = orientation == Orientation::Front;
                self.status = if self.capture_enabled {
                    StatusMessage::Registered
                } else {
                    StatusMessage::ReturnToFront
                };
            }
        }

        self.outcome(Some(orientation), events, false)
    }

    /// Returns to the first step, dropping history and any pending dwell.
    pub fn reset(&mut self) {
        self.step = EnrollmentStep::LeftFace;
        self.gate.reset();
        self.timer.cancel();
        self.capture_enabled = false;
        self.status = StatusMessage::TurnLeft;
    }

    /// Snapshots `frame` for upload. Only allowed while capture is enabled.
    pub fn capture(
        &self,
        frame: &Frame,
        encoder: &dyn FrameEncoder,
    ) -> Result<Vec<u8>, CaptureError> {
        if !self.capture_enabled {
            return Err(CaptureError::NotEnabled);
        }
        encoder.encode(frame)
    }

    fn is_pristine(&self) -> bool {
        self.step == EnrollmentStep::LeftFace
            && !self.timer.is_pending()
            && self.gate.is_empty()
            && !self.capture_enabled
    }

    fn outcome(
        &self,
        orientation: Option<Orientation>,
        events: Vec<EnrollmentEvent>,
        skipped: bool,
    ) -> FrameOutcome {
        FrameOutcome {
            step: self.step,
            orientation,
            status: self.status,
            capture_enabled: self.capture_enabled,
            events,
            skipped,
        }
    }
}

impl Default for EnrollmentSession {
    fn default() -> Self {
        Self::new(EnrollmentConfig::default())
    }
}
