//! JSON bodies exchanged with the `/save-face` endpoint.

use serde::{Deserialize, Serialize};

pub const MESSAGE_DONE: &str = "Done";
pub const ERROR_INVALID_DATA: &str = "Invalid data";
pub const ERROR_ALREADY_REGISTERED: &str = "File already registered";
pub const ERROR_SAVE_FAILED: &str = "Failed to save face";

/// Both fields are optional on the wire so the server can answer a
/// missing field with its own 400 body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFaceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub face_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveFaceResponse {
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveFaceResponse {
    pub fn done() -> Self {
        Self {
            status: true,
            message: Some(MESSAGE_DONE.to_string()),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            status: false,
            message: None,
            error: Some(error.into()),
        }
    }
}
