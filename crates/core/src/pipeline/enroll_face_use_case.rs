use crate::capture::domain::enrollment_record::EnrollmentRecord;
use crate::capture::domain::frame_encoder::{CaptureError, FrameEncoder};
use crate::detection::domain::face_detector::FaceDetector;
use crate::enrollment::domain::clock::Clock;
use crate::enrollment::domain::enrollment_session::{EnrollmentSession, FrameOutcome};
use crate::shared::frame::Frame;

/// Drives one enrollment session from a camera feed.
///
/// Per frame: detect → pick the primary face → let the session judge it
/// at the current clock reading. Detector failures skip the frame rather
/// than ending the session.
pub struct EnrollFaceUseCase {
    detector: Box<dyn FaceDetector>,
    session: EnrollmentSession,
    clock: Box<dyn Clock>,
}

impl EnrollFaceUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        session: EnrollmentSession,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            detector,
            session,
            clock,
        }
    }

    pub fn process(&mut self, frame: &Frame) -> FrameOutcome {
        let now = self.clock.now();
        match self.detector.detect(frame) {
            Ok(detections) => self.session.observe(detections.first(), now),
            Err(e) => {
                log::warn!("Detection failed on frame {}: {e}", frame.index());
                // Still give a pending dwell its chance to fire.
                let events = self.session.tick(now).into_iter().collect();
                FrameOutcome {
                    step: self.session.step(),
                    orientation: None,
                    status: self.session.status(),
                    capture_enabled: self.session.capture_enabled(),
                    events,
                    skipped: true,
                }
            }
        }
    }

    /// Freezes `frame` into a record named `face_<millis>`.
    pub fn capture(
        &self,
        frame: &Frame,
        encoder: &dyn FrameEncoder,
    ) -> Result<EnrollmentRecord, CaptureError> {
        let image = self.session.capture(frame, encoder)?;
        Ok(EnrollmentRecord::timestamped(image))
    }

    pub fn session(&self) -> &EnrollmentSession {
        &self.session
    }
}
