use std::time::Duration;

use crate::shared::constants::DWELL_MS;

/// Cancelable one-shot deadline.
///
/// Armed when the user first holds the required pose; fires once the
/// pose has been held for the full dwell. Polled by the session rather
/// than running on its own thread, so firing and cancelling happen on the
/// frame loop.
#[derive(Debug, Clone)]
pub struct DwellTimer {
    duration: Duration,
    deadline: Option<Duration>,
}

impl DwellTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            deadline: None,
        }
    }

    /// Arms the timer unless it is already pending.
    pub fn start(&mut self, now: Duration) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.duration);
        }
    }

    /// No-op when nothing is pending.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the deadline has passed, disarming
    /// the timer.
    pub fn fire_if_due(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_sub(now))
    }
}

impl Default for DwellTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DWELL_MS))
    }
}
