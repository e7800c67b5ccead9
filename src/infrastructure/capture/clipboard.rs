//! Clipboard-based capture adapter
//!
//! Legacy path: the OS screenshot tool places the capture on the
//! clipboard and this provider reads it back. Kept as an alternative
//! `CaptureProvider` for setups without a scriptable screenshot tool.

use std::io::Cursor;

use async_trait::async_trait;

use crate::application::ports::CaptureProvider;
use crate::domain::capture::{ImageData, ImageMimeType};
use crate::domain::geometry::SelectionRect;
use crate::domain::pipeline::CaptureError;

/// Reads the most recent image from the system clipboard.
/// The selection rect is ignored; whatever was copied is the capture.
pub struct ClipboardCapture;

impl ClipboardCapture {
    /// Create a new clipboard capture provider
    pub fn new() -> Self {
        Self
    }

    /// Encode raw RGBA clipboard data as PNG
    fn encode_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, CaptureError> {
        let buffer = image::RgbaImage::from_raw(width as u32, height as u32, rgba.to_vec())
            .ok_or_else(|| {
                CaptureError::CaptureFailed("clipboard image has inconsistent dimensions".into())
            })?;

        let mut png = Vec::new();
        buffer
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        Ok(png)
    }
}

impl Default for ClipboardCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureProvider for ClipboardCapture {
    async fn capture(&self, _region: Option<SelectionRect>) -> Result<ImageData, CaptureError> {
        // arboard talks to the display server and can block
        let png = tokio::task::spawn_blocking(|| {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

            let img = clipboard.get_image().map_err(|e| match e {
                arboard::Error::ContentNotAvailable => {
                    CaptureError::CaptureFailed("no image on the clipboard".to_string())
                }
                other => CaptureError::CaptureFailed(other.to_string()),
            })?;

            Self::encode_png(img.width, img.height, &img.bytes)
        })
        .await
        .map_err(|e| CaptureError::CaptureFailed(format!("task join error: {}", e)))??;

        Ok(ImageData::new(png, ImageMimeType::Png))
    }

    fn stop_capture(&self) {
        // Nothing in flight; clipboard reads hold no OS capture stream
    }
}
