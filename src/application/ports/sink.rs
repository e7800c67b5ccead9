//! Plan handoff port interface

use async_trait::async_trait;

use crate::domain::capture::{CaptureTrigger, ImageData};
use crate::domain::plan::PlanRecord;

/// Everything a successful run produces, handed off by value.
/// The pipeline retains nothing after the handoff.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    pub trigger: CaptureTrigger,
    pub image: ImageData,
    pub text: String,
    pub plans: Vec<PlanRecord>,
}

impl CaptureOutcome {
    /// Whether extraction found any plans.
    /// An empty list is "no plans found", not a failure.
    pub fn has_plans(&self) -> bool {
        !self.plans.is_empty()
    }
}

/// Port for the form/presentation layer that receives successful
/// outcomes. Auto-save and calendar push hang off this boundary.
#[async_trait]
pub trait PlanSink: Send + Sync {
    /// Receive a successful capture outcome
    async fn present(&self, outcome: CaptureOutcome);
}

/// Blanket implementation for boxed sink types
#[async_trait]
impl PlanSink for Box<dyn PlanSink> {
    async fn present(&self, outcome: CaptureOutcome) {
        self.as_ref().present(outcome).await
    }
}
