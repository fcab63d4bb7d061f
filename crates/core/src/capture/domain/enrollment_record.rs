use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::capture::domain::save_face::SaveFaceRequest;
use crate::shared::constants::JPEG_DATA_URL_PREFIX;

/// A captured face ready to be stored under `file_name`.
#[derive(Clone, Debug, PartialEq)]
pub struct EnrollmentRecord {
    pub file_name: String,
    pub image: Vec<u8>,
}

impl EnrollmentRecord {
    pub fn new(file_name: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            image,
        }
    }

    /// Names the record `face_<unix millis>`.
    pub fn timestamped(image: Vec<u8>) -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        Self::new(format!("face_{millis}"), image)
    }

    pub fn data_url(&self) -> String {
        format!("{JPEG_DATA_URL_PREFIX}{}", STANDARD.encode(&self.image))
    }

    pub fn to_request(&self) -> SaveFaceRequest {
        SaveFaceRequest {
            face_data: Some(self.data_url()),
            file_name: Some(self.file_name.clone()),
        }
    }
}
