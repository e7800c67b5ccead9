//! Pipeline state machine entity

use thiserror::Error;

use crate::domain::capture::{CaptureTrigger, ImageInfo};
use crate::domain::geometry::SelectionRect;
use crate::domain::plan::PlanRecord;

use super::error::PipelineError;
use super::state::PipelineState;

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: &'static str,
    pub action: &'static str,
}

/// Pipeline state machine entity.
/// Guards transitions between run stages; created once and reused
/// across runs.
///
/// State machine:
///   IDLE -> SELECTING (begin_selecting, interactive triggers)
///   IDLE -> CAPTURING (begin_capturing, non-interactive triggers)
///   SELECTING -> CAPTURING (finalize_selection)
///   SELECTING -> IDLE (abort_selection, silent)
///   CAPTURING -> CAPTURING (set_capture_rect, bounds resolved)
///   CAPTURING -> RECOGNIZING (begin_recognizing)
///   RECOGNIZING -> EXTRACTING (begin_extracting)
///   RECOGNIZING | EXTRACTING -> SUCCEEDED (succeed)
///   SELECTING | CAPTURING | RECOGNIZING | EXTRACTING -> FAILED (fail)
///   any -> IDLE (reset)
#[derive(Debug, Default)]
pub struct PipelineMachine {
    state: PipelineState,
}

impl PipelineMachine {
    /// Create a new machine in the idle state
    pub fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state.as_str(),
            action,
        }
    }

    /// Start an interactive run: IDLE -> SELECTING
    pub fn begin_selecting(
        &mut self,
        trigger: CaptureTrigger,
    ) -> Result<(), InvalidStateTransition> {
        if !self.state.is_idle() {
            return Err(self.invalid("begin selecting"));
        }
        self.state = PipelineState::Selecting(trigger);
        Ok(())
    }

    /// Start a non-interactive run: IDLE -> CAPTURING.
    /// The rect may be zero while the capture bounds are resolved.
    pub fn begin_capturing(&mut self, rect: SelectionRect) -> Result<(), InvalidStateTransition> {
        if !self.state.is_idle() {
            return Err(self.invalid("begin capturing"));
        }
        self.state = PipelineState::Capturing(rect);
        Ok(())
    }

    /// SELECTING -> CAPTURING with the finalized selection
    pub fn finalize_selection(
        &mut self,
        rect: SelectionRect,
    ) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, PipelineState::Selecting(_)) {
            return Err(self.invalid("finalize selection"));
        }
        self.state = PipelineState::Capturing(rect);
        Ok(())
    }

    /// SELECTING -> IDLE. The silent no-selection path, not a failure.
    pub fn abort_selection(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, PipelineState::Selecting(_)) {
            return Err(self.invalid("abort selection"));
        }
        self.state = PipelineState::Idle;
        Ok(())
    }

    /// Refine the capture rect once bounds are resolved (stays CAPTURING)
    pub fn set_capture_rect(&mut self, rect: SelectionRect) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, PipelineState::Capturing(_)) {
            return Err(self.invalid("set capture rect"));
        }
        self.state = PipelineState::Capturing(rect);
        Ok(())
    }

    /// CAPTURING -> RECOGNIZING
    pub fn begin_recognizing(&mut self, image: ImageInfo) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, PipelineState::Capturing(_)) {
            return Err(self.invalid("begin recognizing"));
        }
        self.state = PipelineState::Recognizing(image);
        Ok(())
    }

    /// RECOGNIZING -> EXTRACTING
    pub fn begin_extracting(&mut self, text: String) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, PipelineState::Recognizing(_)) {
            return Err(self.invalid("begin extracting"));
        }
        self.state = PipelineState::Extracting(text);
        Ok(())
    }

    /// Terminal success. Valid from RECOGNIZING (empty text short-circuit)
    /// or EXTRACTING. An empty plan list is still a success.
    pub fn succeed(&mut self, plans: Vec<PlanRecord>) -> Result<(), InvalidStateTransition> {
        if !matches!(
            self.state,
            PipelineState::Recognizing(_) | PipelineState::Extracting(_)
        ) {
            return Err(self.invalid("succeed"));
        }
        self.state = PipelineState::Succeeded(plans);
        Ok(())
    }

    /// Terminal failure, from any in-flight stage
    pub fn fail(&mut self, error: PipelineError) -> Result<(), InvalidStateTransition> {
        if self.state.is_idle() || self.state.is_terminal() {
            return Err(self.invalid("fail"));
        }
        self.state = PipelineState::Failed(error);
        Ok(())
    }

    /// Return to IDLE from any state. Consumes terminal states after
    /// handoff and implements cancellation.
    pub fn reset(&mut self) {
        self.state = PipelineState::Idle;
    }
}
