use thiserror::Error;

use crate::capture::domain::enrollment_record::EnrollmentRecord;

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server rejected face ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected response from server: {0}")]
    InvalidResponse(String),
}

impl SubmitError {
    /// Only transport failures are worth another attempt; a server
    /// answer is final.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitError::Network(_))
    }
}

/// Hands an enrollment record to the persistence service.
pub trait FaceSubmitter: Send + Sync {
    /// Returns the server's confirmation message on success.
    fn submit(&self, record: &EnrollmentRecord) -> Result<String, SubmitError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_retry() {
        assert!(SubmitError::Network("reset".into()).is_retryable());
        assert!(!SubmitError::Rejected {
            status: 409,
            message: "File already registered".into()
        }
        .is_retryable());
        assert!(!SubmitError::InvalidResponse("not json".into()).is_retryable());
    }
}
