//! Text recognition port interface

use async_trait::async_trait;

use crate::domain::capture::ImageData;
use crate::domain::pipeline::RecognitionError;

/// Port for OCR text recognition
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in the given image.
    ///
    /// An image containing no text yields `Ok` with an empty string;
    /// the caller decides what empty text means.
    async fn recognize(&self, image: &ImageData) -> Result<String, RecognitionError>;
}

/// Blanket implementation for boxed recognizer types
#[async_trait]
impl TextRecognizer for Box<dyn TextRecognizer> {
    async fn recognize(&self, image: &ImageData) -> Result<String, RecognitionError> {
        self.as_ref().recognize(image).await
    }
}
