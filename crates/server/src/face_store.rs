//! One-file-per-identity JPEG store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use faceenroll_core::shared::constants::JPEG_DATA_URL_PREFIX;

const MAX_FILE_NAME_LEN: usize = 128;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0} already exists")]
    AlreadyExists(PathBuf),
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes `<name>.jpg` files into a single directory, never overwriting.
#[derive(Debug)]
pub struct FaceStore {
    dir: PathBuf,
}

impl FaceStore {
    /// Opens the store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(format!("{file_name}.jpg"))
    }

    /// Creates `<file_name>.jpg` exclusively. The existence check and the
    /// create are one syscall, so two racing saves of one name cannot both
    /// succeed. A failed write removes the partial file.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let path = self.path_for(file_name);

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::AlreadyExists(path));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let written = async {
            file.write_all(bytes).await?;
            file.sync_all().await
        }
        .await;

        if let Err(source) = written {
            drop(file);
            let _ = tokio::fs::remove_file(&path).await;
            return Err(StoreError::Io { path, source });
        }
        Ok(path)
    }
}

/// Accepts `[A-Za-z0-9_.-]`, no leading dot, at most 128 characters.
/// Anything else could escape the store directory or clash with hidden files.
pub fn validate_file_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("file name is empty".into());
    }
    if name.len() > MAX_FILE_NAME_LEN {
        return Err(format!("file name longer than {MAX_FILE_NAME_LEN} characters"));
    }
    if name.starts_with('.') {
        return Err(format!("file name {name:?} starts with a dot"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(format!("file name {name:?} contains {c:?}"));
    }
    Ok(())
}

/// Decodes a `data:image/jpeg;base64,` URL (or bare base64) to bytes.
pub fn decode_face_data(face_data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = face_data
        .strip_prefix(JPEG_DATA_URL_PREFIX)
        .unwrap_or(face_data);
    STANDARD.decode(payload.trim())
}
