//! Capture storage port interface

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::capture::{CaptureMetadata, ImageData};

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("No save directory available")]
    NoSaveDirectory,

    #[error("Failed to write capture: {0}")]
    WriteFailed(String),

    #[error("Failed to read captures: {0}")]
    ReadFailed(String),

    #[error("Failed to encode metadata: {0}")]
    EncodeFailed(String),
}

/// Port for persisting captures and their metadata
#[async_trait]
pub trait CaptureStore: Send + Sync {
    /// Save a capture image with its metadata.
    ///
    /// # Returns
    /// The path of the saved image
    async fn save(
        &self,
        image: &ImageData,
        metadata: &CaptureMetadata,
    ) -> Result<PathBuf, StorageError>;

    /// Load recent capture metadata, newest first.
    /// Entries that cannot be decoded are skipped.
    async fn load_recent(&self) -> Result<Vec<CaptureMetadata>, StorageError>;
}
