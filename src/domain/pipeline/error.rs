//! Pipeline error taxonomy, tagged by originating stage

use std::fmt;
use thiserror::Error;

/// Screen capture errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Screen capture permission denied")]
    PermissionDenied,

    #[error("No display available for capture")]
    NoDisplay,

    #[error("Capture failed: {0}")]
    CaptureFailed(String),
}

/// Text recognition errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognitionError {
    #[error("OCR engine not found. Please install tesseract.")]
    EngineNotFound,

    #[error("Text recognition failed: {0}")]
    RecognitionFailed(String),
}

/// Plan extraction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Not authenticated. Set PLANSNAP_TOKEN or run 'plansnap config set auth_token <token>'")]
    Unauthenticated,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),
}

/// The pipeline stage a failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    Selection,
    Capture,
    Recognition,
    Extraction,
}

impl PipelineStage {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Capture => "capture",
            Self::Recognition => "recognition",
            Self::Extraction => "extraction",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A collaborator failure wrapped with its originating stage.
/// Selection aborts are not errors and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),
}

impl PipelineError {
    /// The stage this failure originated from
    pub const fn stage(&self) -> PipelineStage {
        match self {
            Self::Capture(_) => PipelineStage::Capture,
            Self::Recognition(_) => PipelineStage::Recognition,
            Self::Extraction(_) => PipelineStage::Extraction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_carries_stage() {
        let err: PipelineError = CaptureError::NoDisplay.into();
        assert_eq!(err.stage(), PipelineStage::Capture);

        let err: PipelineError = RecognitionError::EngineNotFound.into();
        assert_eq!(err.stage(), PipelineStage::Recognition);

        let err: PipelineError = ExtractionError::Unauthenticated.into();
        assert_eq!(err.stage(), PipelineStage::Extraction);
    }

    #[test]
    fn messages_are_human_readable() {
        let err: PipelineError = ExtractionError::NetworkError("timed out".into()).into();
        let msg = err.to_string();
        assert!(msg.contains("Extraction failed"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn stage_display() {
        assert_eq!(PipelineStage::Capture.to_string(), "capture");
        assert_eq!(PipelineStage::Extraction.to_string(), "extraction");
    }
}
