//! Filesystem capture store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{CaptureStore, StorageError};
use crate::domain::capture::{CaptureMetadata, ImageData};

/// Stores each capture in its own directory:
/// `{base}/{id}/capture.png` plus `metadata.json`.
pub struct FsCaptureStore {
    base_dir: PathBuf,
}

impl FsCaptureStore {
    /// Create a store at the default location (`~/Pictures/PlanSnap`)
    pub fn new() -> Result<Self, StorageError> {
        let base = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .ok_or(StorageError::NoSaveDirectory)?
            .join("PlanSnap");
        Ok(Self::with_base_dir(base))
    }

    /// Create a store at a custom location
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The base directory captures are stored under
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }
}

#[async_trait]
impl CaptureStore for FsCaptureStore {
    async fn save(
        &self,
        image: &ImageData,
        metadata: &CaptureMetadata,
    ) -> Result<PathBuf, StorageError> {
        let capture_dir = self.base_dir.join(metadata.id.to_string());
        fs::create_dir_all(&capture_dir)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let image_path =
            capture_dir.join(format!("capture.{}", image.mime_type().extension()));
        fs::write(&image_path, image.data())
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let encoded = serde_json::to_vec_pretty(metadata)
            .map_err(|e| StorageError::EncodeFailed(e.to_string()))?;
        fs::write(capture_dir.join("metadata.json"), encoded)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        log::info!("saved capture to {}", image_path.display());
        Ok(image_path)
    }

    async fn load_recent(&self) -> Result<Vec<CaptureMetadata>, StorageError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.base_dir)
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;

        let mut captures = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?
        {
            let metadata_path = entry.path().join("metadata.json");
            let Ok(content) = fs::read(&metadata_path).await else {
                continue;
            };
            // Undecodable entries are skipped, not fatal
            match serde_json::from_slice::<CaptureMetadata>(&content) {
                Ok(metadata) => captures.push(metadata),
                Err(e) => log::warn!("skipping {}: {}", metadata_path.display(), e),
            }
        }

        captures.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(captures)
    }
}
