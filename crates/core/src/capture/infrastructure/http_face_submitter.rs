use std::time::Duration;

use crate::capture::domain::enrollment_record::EnrollmentRecord;
use crate::capture::domain::face_submitter::{FaceSubmitter, SubmitError};
use crate::capture::domain::save_face::SaveFaceResponse;
use crate::shared::constants::SAVE_FACE_PATH;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts enrollment records to a `/save-face` endpoint as JSON.
///
/// Blocking; run it off the frame loop (see `submit_worker`).
pub struct HttpFaceSubmitter {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpFaceSubmitter {
    /// `base_url` is the server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: format!("{}{SAVE_FACE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl FaceSubmitter for HttpFaceSubmitter {
    fn submit(&self, record: &EnrollmentRecord) -> Result<String, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&record.to_request())
            .send()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        interpret(status, &body)
    }
}

fn interpret(status: u16, body: &str) -> Result<String, SubmitError> {
    let parsed: SaveFaceResponse = serde_json::from_str(body)
        .map_err(|e| SubmitError::InvalidResponse(format!("HTTP {status}: {e}")))?;

    if (200..300).contains(&status) && parsed.status {
        return Ok(parsed.message.unwrap_or_else(|| "Done".to_string()));
    }
    Err(SubmitError::Rejected {
        status,
        message: parsed
            .error
            .or(parsed.message)
            .unwrap_or_else(|| "An error occurred".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_path() {
        let s = HttpFaceSubmitter::new("http://localhost:3000/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(s.endpoint(), "http://localhost:3000/save-face");
    }

    #[test]
    fn test_interpret_success() {
        let msg = interpret(200, r#"{"status":true,"message":"Done"}"#).unwrap();
        assert_eq!(msg, "Done");
    }

    #[test]
    fn test_interpret_conflict() {
        let err = interpret(409, r#"{"status":false,"error":"File already registered"}"#)
            .unwrap_err();
        match err {
            SubmitError::Rejected { status, message } => {
                assert_eq!(status, 409);
                assert_eq!(message, "File already registered");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_interpret_status_false_on_200_is_rejection() {
        let err = interpret(200, r#"{"status":false,"error":"nope"}"#).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected { status: 200, .. }));
    }

    #[test]
    fn test_interpret_non_json() {
        let err = interpret(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SubmitError::InvalidResponse(_)));
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        let s = HttpFaceSubmitter::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = s
            .submit(&EnrollmentRecord::new("face_1", vec![0xFF, 0xD8]))
            .unwrap_err();
        assert!(err.is_retryable());
    }
}
