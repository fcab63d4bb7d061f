//! Request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use faceenroll_core::capture::domain::save_face::{SaveFaceRequest, SaveFaceResponse};

use crate::error::{ApiError, ApiResult};
use crate::face_store::{decode_face_data, validate_file_name};
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /save-face`: stores a data-URL JPEG as `<fileName>.jpg`.
pub async fn save_face(
    State(state): State<AppState>,
    payload: Result<Json<SaveFaceRequest>, JsonRejection>,
) -> ApiResult<Json<SaveFaceResponse>> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge
        } else {
            ApiError::validation(rejection.body_text())
        }
    })?;

    let face_data = request
        .face_data
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("missing faceData"))?;
    let file_name = request
        .file_name
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::validation("missing fileName"))?;

    validate_file_name(&file_name).map_err(ApiError::Validation)?;

    let bytes = decode_face_data(&face_data)
        .map_err(|e| ApiError::validation(format!("faceData is not valid base64: {e}")))?;
    if bytes.is_empty() {
        return Err(ApiError::validation("faceData decodes to an empty image"));
    }

    let path = state.store.save(&file_name, &bytes).await?;
    log::info!("Saved face {} ({} bytes)", path.display(), bytes.len());

    Ok(Json(SaveFaceResponse::done()))
}
