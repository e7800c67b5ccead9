//! Observable pipeline state

use std::fmt;

use crate::domain::capture::{CaptureTrigger, ImageInfo};
use crate::domain::geometry::SelectionRect;
use crate::domain::plan::PlanRecord;

use super::error::PipelineError;

/// The single source of truth for what the pipeline is doing.
/// Exactly one instance exists per pipeline; UI observers watch it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PipelineState {
    /// Resting state between runs
    #[default]
    Idle,
    /// Interactive region selection in progress
    Selecting(CaptureTrigger),
    /// Capture provider invocation in flight.
    /// A zero rect means the capture region is still being resolved.
    Capturing(SelectionRect),
    /// Text recognizer invocation in flight
    Recognizing(ImageInfo),
    /// Extraction client invocation in flight, holding the recognized text
    Extracting(String),
    /// Terminal success; consumed by the form handoff, then reset to Idle.
    /// An empty list means "no plans found", not a failure.
    Succeeded(Vec<PlanRecord>),
    /// Terminal failure; consumed by the notification handoff, then reset
    Failed(PipelineError),
}

impl PipelineState {
    /// Whether the pipeline is at rest
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether this is a terminal state awaiting handoff
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// Short name for status reporting
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Selecting(_) => "selecting",
            Self::Capturing(_) => "capturing",
            Self::Recognizing(_) => "recognizing",
            Self::Extracting(_) => "extracting",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::error::CaptureError;

    #[test]
    fn default_is_idle() {
        assert!(PipelineState::default().is_idle());
    }

    #[test]
    fn terminal_states() {
        assert!(PipelineState::Succeeded(vec![]).is_terminal());
        assert!(PipelineState::Failed(CaptureError::NoDisplay.into()).is_terminal());
        assert!(!PipelineState::Idle.is_terminal());
        assert!(!PipelineState::Selecting(CaptureTrigger::MenuArea).is_terminal());
    }

    #[test]
    fn state_display() {
        assert_eq!(PipelineState::Idle.to_string(), "idle");
        assert_eq!(
            PipelineState::Capturing(SelectionRect::ZERO).to_string(),
            "capturing"
        );
        assert_eq!(PipelineState::Succeeded(vec![]).to_string(), "succeeded");
    }
}
