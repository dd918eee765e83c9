//! Media port
//!
//! Turns a user-selected image into a display handle for the presentation
//! layer and an inline payload for the model.

use super::model_invoker::InlineImage;
use async_trait::async_trait;
use duet_domain::ImageAttachment;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while preparing an image for a discussion
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Failed to read image {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image is empty: {0}")]
    Empty(PathBuf),
}

/// An image the user attached to a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
}

/// Port for image handling
#[async_trait]
pub trait MediaPort: Send + Sync {
    /// Describe a local file as an attachable image, rejecting other files.
    fn describe(&self, path: &Path) -> Result<ImageUpload, MediaError>;

    /// Create a transient display handle for the image.
    fn open_display(&self, upload: &ImageUpload) -> ImageAttachment;

    /// Release a handle created by [`MediaPort::open_display`].
    fn release_display(&self, attachment: &ImageAttachment);

    /// Read and encode the image for the model.
    async fn encode(&self, upload: &ImageUpload) -> Result<InlineImage, MediaError>;
}

/// Releases a display handle when dropped, on every exit path.
pub struct DisplayLease<'a> {
    media: &'a dyn MediaPort,
    attachment: ImageAttachment,
}

impl<'a> DisplayLease<'a> {
    pub fn open(media: &'a dyn MediaPort, upload: &ImageUpload) -> Self {
        let attachment = media.open_display(upload);
        Self { media, attachment }
    }

    pub fn attachment(&self) -> &ImageAttachment {
        &self.attachment
    }
}

impl Drop for DisplayLease<'_> {
    fn drop(&mut self) {
        self.media.release_display(&self.attachment);
    }
}
