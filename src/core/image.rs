//! Reference images attached to an order
//!
//! Uploaded images get a preview handle (an object URL in a browser, a temp
//! file or cache entry elsewhere) from a [`PreviewStore`]. The handle is a
//! transient resource and must be revoked when the image leaves the order.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Identifier of an image within one order session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(pub Uuid);

impl ImageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ImageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A file offered by the customer, before it joins the order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Declared MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    pub file_name: Option<String>,
    pub bytes: Arc<[u8]>,
}

impl ImageUpload {
    pub fn new(mime_type: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            mime_type: mime_type.into(),
            file_name: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// An image held by the order, with its live preview handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceImage {
    pub id: ImageId,
    pub mime_type: String,
    pub file_name: Option<String>,
    pub bytes: Arc<[u8]>,
    pub preview_url: String,
}

impl ReferenceImage {
    pub fn from_upload(upload: ImageUpload, preview_url: String) -> Self {
        Self {
            id: ImageId::new(),
            mime_type: upload.mime_type,
            file_name: upload.file_name,
            bytes: upload.bytes,
            preview_url,
        }
    }

    pub fn with_id(mut self, id: ImageId) -> Self {
        self.id = id;
        self
    }
}

/// Issues and releases preview handles for images
///
/// Implementations may be backed by browser object URLs, a temp directory
/// or an in-memory cache. The order never keeps a handle for an image it
/// no longer holds.
pub trait PreviewStore: Send + Sync {
    /// Create a preview handle for an image
    fn create(&self, id: ImageId, upload: &ImageUpload) -> Result<String>;

    /// Release a previously issued handle
    ///
    /// Revoking an unknown handle is not an error.
    fn revoke(&self, preview_url: &str) -> Result<()>;
}
