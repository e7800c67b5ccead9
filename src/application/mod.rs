//! Application layer - Use cases and port interfaces
//!
//! Contains the capture pipeline orchestrator and the trait
//! definitions it consumes.

pub mod pipeline;
pub mod ports;
pub mod selection;

pub use pipeline::{CapturePipeline, PipelineConfig, RunOutcome};
pub use selection::{PointerEvent, PointerSelection};
