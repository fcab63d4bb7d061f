//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use faceenroll_core::capture::domain::save_face::{
    SaveFaceResponse, ERROR_ALREADY_REGISTERED, ERROR_INVALID_DATA, ERROR_SAVE_FAILED,
};

use crate::face_store::StoreError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Internal detail is logged; clients only ever see the fixed messages.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("request body too large")]
    PayloadTooLarge,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::PayloadTooLarge => ERROR_INVALID_DATA,
            ApiError::Conflict(_) => ERROR_ALREADY_REGISTERED,
            ApiError::Storage(_) => ERROR_SAVE_FAILED,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(path) => ApiError::Conflict(path.display().to_string()),
            e @ StoreError::Io { .. } => ApiError::Storage(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(_) => log::error!("Error saving face: {self}"),
            _ => log::warn!("Rejected save-face request: {self}"),
        }

        let body = SaveFaceResponse::failure(self.public_message());
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::Storage("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_error_mapping() {
        let conflict: ApiError = StoreError::AlreadyExists(PathBuf::from("faces/a.jpg")).into();
        assert!(matches!(conflict, ApiError::Conflict(_)));

        let io: ApiError = StoreError::Io {
            path: PathBuf::from("faces/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
        .into();
        assert!(matches!(io, ApiError::Storage(_)));
        assert_eq!(io.public_message(), "Failed to save face");
    }
}
