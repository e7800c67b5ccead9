//! Pipeline state machine, observable state, and error taxonomy.

pub mod error;
pub mod machine;
pub mod state;

pub use error::{
    CaptureError, ExtractionError, PipelineError, PipelineStage, RecognitionError,
};
pub use machine::{InvalidStateTransition, PipelineMachine};
pub use state::PipelineState;
