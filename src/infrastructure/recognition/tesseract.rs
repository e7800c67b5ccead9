//! tesseract-based OCR adapter

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::application::ports::TextRecognizer;
use crate::domain::capture::ImageData;
use crate::domain::pipeline::RecognitionError;

/// Default OCR language
const DEFAULT_LANG: &str = "eng";

/// OCR via the `tesseract` CLI: image bytes on stdin, recognized
/// UTF-8 text on stdout. An image with no text yields empty output,
/// which is not an error.
pub struct TesseractRecognizer {
    lang: String,
}

impl TesseractRecognizer {
    /// Create a recognizer for the default language
    pub fn new() -> Self {
        Self {
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Create a recognizer for a specific tesseract language code
    pub fn with_lang(lang: impl Into<String>) -> Self {
        Self { lang: lang.into() }
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    async fn recognize(&self, image: &ImageData) -> Result<String, RecognitionError> {
        let mut child = Command::new("tesseract")
            .args(["stdin", "stdout", "-l", &self.lang])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecognitionError::EngineNotFound
                } else {
                    RecognitionError::RecognitionFailed(e.to_string())
                }
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RecognitionError::RecognitionFailed("missing stdin pipe".into()))?;
        stdin
            .write_all(image.data())
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(e.to_string()))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| RecognitionError::RecognitionFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::RecognitionFailed(
                stderr.trim().to_string(),
            ));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        log::debug!("recognized {} characters", text.len());
        Ok(text)
    }
}
