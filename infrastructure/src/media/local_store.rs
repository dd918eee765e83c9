//! Filesystem-backed [`MediaPort`]
//!
//! Display handles are `file://` URLs registered in a live set until the
//! session releases them; encoding reads the file and base64-encodes it.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use duet_application::ports::media::{ImageUpload, MediaError, MediaPort};
use duet_application::ports::model_invoker::InlineImage;
use duet_domain::ImageAttachment;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Image store reading attachments from the local filesystem
#[derive(Debug, Default)]
pub struct LocalMediaStore {
    live: Mutex<HashSet<String>>,
}

impl LocalMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// MIME type for a path, judged by its extension
    pub fn mime_for_path(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "webp" => Some("image/webp"),
            "gif" => Some("image/gif"),
            "heic" => Some("image/heic"),
            "heif" => Some("image/heif"),
            _ => None,
        }
    }

    /// Describe a file the user wants to attach.
    ///
    /// Unknown extensions are rejected up front so nothing is ever sent to
    /// the model with a guessed type.
    pub fn upload_from_path(path: impl AsRef<Path>) -> Result<ImageUpload, MediaError> {
        let path = path.as_ref();
        let mime_type = Self::mime_for_path(path)
            .ok_or_else(|| MediaError::UnsupportedType(path.display().to_string()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(ImageUpload {
            path: path.to_path_buf(),
            file_name,
            mime_type: mime_type.to_string(),
        })
    }

    /// Number of display handles not yet released
    pub fn live_handles(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

#[async_trait]
impl MediaPort for LocalMediaStore {
    fn describe(&self, path: &Path) -> Result<ImageUpload, MediaError> {
        Self::upload_from_path(path)
    }

    fn open_display(&self, upload: &ImageUpload) -> ImageAttachment {
        let absolute = std::path::absolute(&upload.path).unwrap_or_else(|_| upload.path.clone());
        let display_url = format!("file://{}", absolute.display());
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(display_url.clone());
        ImageAttachment {
            display_url,
            file_name: upload.file_name.clone(),
            mime_type: upload.mime_type.clone(),
        }
    }

    fn release_display(&self, attachment: &ImageAttachment) {
        let removed = self
            .live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&attachment.display_url);
        debug!(url = %attachment.display_url, removed, "Display handle released");
    }

    async fn encode(&self, upload: &ImageUpload) -> Result<InlineImage, MediaError> {
        if !upload.mime_type.starts_with("image/") {
            return Err(MediaError::UnsupportedType(upload.mime_type.clone()));
        }
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| MediaError::Read {
                path: upload.path.clone(),
                source,
            })?;
        if bytes.is_empty() {
            return Err(MediaError::Empty(upload.path.clone()));
        }
        debug!(path = %upload.path.display(), bytes = bytes.len(), "Image encoded");
        Ok(InlineImage {
            mime_type: upload.mime_type.clone(),
            base64_data: BASE64_STANDARD.encode(bytes),
        })
    }
}
