//! Uploaded image storage.

use std::path::{Path, PathBuf};

use axum::body::Bytes;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};

/// Accepted image formats, matched against both the extension and the
/// declared content type.
pub const IMAGE_KINDS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

/// A file field taken from a multipart body.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    /// Form field name, used as the stored filename prefix.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Metadata of a written image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    pub filename: String,
    #[serde(rename = "originalname")]
    pub original_name: String,
    pub size: usize,
    /// Public path under `/images`.
    pub path: String,
}

/// Writes validated uploads into a single directory.
#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Reject files that are too large or are not an accepted image type.
    pub fn check(&self, file: &UploadedFile) -> ApiResult<()> {
        if file.data.len() > self.max_bytes {
            return Err(ApiError::Validation(format!(
                "image exceeds the {} byte limit",
                self.max_bytes
            )));
        }

        let extension = Path::new(&file.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let extension_ok = IMAGE_KINDS.contains(&extension.as_str());
        let content_type = file.content_type.to_ascii_lowercase();
        let type_ok = IMAGE_KINDS.iter().any(|kind| content_type.contains(kind));

        if !(extension_ok && type_ok) {
            return Err(ApiError::Validation(format!(
                "only image files are accepted ({})",
                IMAGE_KINDS.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate and write `file`, returning its stored name.
    ///
    /// Stored names follow `{field}-{millis}-{random}{.ext}`; the original
    /// filename contributes only its extension.
    pub async fn store(&self, file: &UploadedFile) -> ApiResult<StoredImage> {
        self.check(file)?;

        let filename = stored_name(&file.field, &file.file_name);
        let path = self.dir.join(&filename);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| storage_failure("failed to create images dir", e))?;
        tokio::fs::write(&path, &file.data)
            .await
            .map_err(|e| storage_failure("failed to write image", e))?;

        debug!(%filename, size = file.data.len(), "image stored");
        Ok(StoredImage {
            path: format!("/images/{filename}"),
            filename,
            original_name: file.file_name.clone(),
            size: file.data.len(),
        })
    }

    /// Best-effort removal of a stored image.
    pub async fn discard(&self, filename: &str) {
        if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
            warn!(filename, error = %e, "failed to remove image");
        }
    }
}

/// Log the I/O detail and answer with `message` alone.
fn storage_failure(message: &str, err: std::io::Error) -> ApiError {
    tracing::error!(error = %err, "{message}");
    ApiError::Storage(message.into())
}

fn stored_name(field: &str, original: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    let extension = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("{field}-{millis}-{suffix}{extension}")
}
