use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};

use crate::capture::domain::enrollment_record::EnrollmentRecord;
use crate::capture::domain::face_submitter::{FaceSubmitter, SubmitError};
use crate::enrollment::domain::status_message::StatusMessage;

/// Messages sent from the submit thread to the frame loop.
#[derive(Debug)]
pub enum SubmitMessage {
    Started { file_name: String },
    Retrying { attempt: u32, error: String },
    Saved(String),
    Failed(SubmitError),
}

impl SubmitMessage {
    pub fn status(&self) -> StatusMessage {
        match self {
            SubmitMessage::Started { .. } | SubmitMessage::Retrying { .. } => StatusMessage::Saving,
            SubmitMessage::Saved(_) => StatusMessage::Saved,
            SubmitMessage::Failed(_) => StatusMessage::SaveFailed,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, SubmitMessage::Saved(_) | SubmitMessage::Failed(_))
    }
}

/// Bounded retry for transport failures; server answers are never retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Delay before attempt `n + 1` is `backoff * n`.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: Duration::from_millis(250),
        }
    }
}

/// Submits `record` on a background thread. The receiver yields
/// `Started`, any `Retrying`, then exactly one `Saved` or `Failed`.
pub fn spawn(
    submitter: Arc<dyn FaceSubmitter>,
    record: EnrollmentRecord,
    policy: RetryPolicy,
) -> Receiver<SubmitMessage> {
    let (tx, rx) = crossbeam_channel::unbounded::<SubmitMessage>();

    thread::spawn(move || {
        let final_message = match run_submit(&tx, submitter.as_ref(), &record, policy) {
            Ok(message) => {
                log::info!("Saved face {}: {message}", record.file_name);
                SubmitMessage::Saved(message)
            }
            Err(e) => {
                log::error!("Failed to save face {}: {e}", record.file_name);
                SubmitMessage::Failed(e)
            }
        };
        let _ = tx.send(final_message);
    });

    rx
}

fn run_submit(
    tx: &Sender<SubmitMessage>,
    submitter: &dyn FaceSubmitter,
    record: &EnrollmentRecord,
    policy: RetryPolicy,
) -> Result<String, SubmitError> {
    let _ = tx.send(SubmitMessage::Started {
        file_name: record.file_name.clone(),
    });

    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match submitter.submit(record) {
            Ok(message) => return Ok(message),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                log::warn!("Submit attempt {attempt} failed: {e}");
                let _ = tx.send(SubmitMessage::Retrying {
                    attempt,
                    error: e.to_string(),
                });
                thread::sleep(policy.backoff * attempt);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replays canned results in order, recording how often it was called.
    struct ScriptedSubmitter {
        results: Mutex<Vec<Result<String, SubmitError>>>,
        calls: Mutex<u32>,
    }

    impl ScriptedSubmitter {
        fn new(mut results: Vec<Result<String, SubmitError>>) -> Arc<Self> {
            results.reverse();
            Arc::new(Self {
                results: Mutex::new(results),
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    impl FaceSubmitter for ScriptedSubmitter {
        fn submit(&self, _record: &EnrollmentRecord) -> Result<String, SubmitError> {
            *self.calls.lock().unwrap() += 1;
            self.results
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(SubmitError::Network("script exhausted".into())))
        }
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: Duration::from_millis(1),
        }
    }

    fn record() -> EnrollmentRecord {
        EnrollmentRecord::new("face_1", vec![0xFF, 0xD8])
    }

    fn drain(rx: Receiver<SubmitMessage>) -> Vec<SubmitMessage> {
        rx.iter().collect()
    }

    #[test]
    fn test_success_first_try() {
        let submitter = ScriptedSubmitter::new(vec![Ok("Done".into())]);
        let messages = drain(spawn(submitter.clone(), record(), fast_policy(3)));

        assert!(matches!(&messages[0], SubmitMessage::Started { file_name } if file_name == "face_1"));
        assert!(matches!(&messages[1], SubmitMessage::Saved(m) if m == "Done"));
        assert_eq!(messages.len(), 2);
        assert_eq!(submitter.calls(), 1);
    }

    #[test]
    fn test_network_errors_retried_until_success() {
        let submitter = ScriptedSubmitter::new(vec![
            Err(SubmitError::Network("refused".into())),
            Err(SubmitError::Network("refused".into())),
            Ok("Done".into()),
        ]);
        let messages = drain(spawn(submitter.clone(), record(), fast_policy(3)));

        let retries = messages
            .iter()
            .filter(|m| matches!(m, SubmitMessage::Retrying { .. }))
            .count();
        assert_eq!(retries, 2);
        assert!(matches!(messages.last(), Some(SubmitMessage::Saved(_))));
        assert_eq!(submitter.calls(), 3);
    }

    #[test]
    fn test_retries_are_bounded() {
        let submitter = ScriptedSubmitter::new(vec![]);
        let messages = drain(spawn(submitter.clone(), record(), fast_policy(2)));

        assert!(matches!(
            messages.last(),
            Some(SubmitMessage::Failed(SubmitError::Network(_)))
        ));
        assert_eq!(submitter.calls(), 2);
    }

    #[test]
    fn test_rejection_not_retried() {
        let submitter = ScriptedSubmitter::new(vec![Err(SubmitError::Rejected {
            status: 409,
            message: "File already registered".into(),
        })]);
        let messages = drain(spawn(submitter.clone(), record(), fast_policy(5)));

        assert_eq!(submitter.calls(), 1);
        let last = messages.last().unwrap();
        assert!(last.is_final());
        assert_eq!(last.status(), StatusMessage::SaveFailed);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            SubmitMessage::Started {
                file_name: "x".into()
            }
            .status(),
            StatusMessage::Saving
        );
        assert_eq!(SubmitMessage::Saved("Done".into()).status(), StatusMessage::Saved);
    }
}
