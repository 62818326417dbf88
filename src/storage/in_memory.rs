//! In-memory implementation of PreviewStore for testing and headless use

use crate::core::image::{ImageId, ImageUpload, PreviewStore};
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// A preview handle issued by the in-memory store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    pub image_id: ImageId,
    pub mime_type: String,
    pub size: usize,
}

/// In-memory preview store
///
/// Hands out `mem:<uuid>` handles and tracks which ones are still live.
/// Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryPreviewStore {
    previews: Arc<RwLock<HashMap<String, PreviewEntry>>>,
}

impl InMemoryPreviewStore {
    /// Create a new in-memory preview store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles that were created and not yet revoked
    pub fn live_count(&self) -> usize {
        self.previews.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Whether `preview_url` is still live
    pub fn is_live(&self, preview_url: &str) -> bool {
        self.previews
            .read()
            .map(|p| p.contains_key(preview_url))
            .unwrap_or(false)
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn create(&self, id: ImageId, upload: &ImageUpload) -> Result<String> {
        let mut previews = self
            .previews
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let url = format!("mem:{}", id);
        previews.insert(
            url.clone(),
            PreviewEntry {
                image_id: id,
                mime_type: upload.mime_type.clone(),
                size: upload.bytes.len(),
            },
        );

        Ok(url)
    }

    fn revoke(&self, preview_url: &str) -> Result<()> {
        let mut previews = self
            .previews
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        previews.remove(preview_url);

        Ok(())
    }
}
