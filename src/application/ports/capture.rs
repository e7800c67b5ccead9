//! Screen capture port interface

use async_trait::async_trait;

use crate::domain::capture::ImageData;
use crate::domain::geometry::SelectionRect;
use crate::domain::pipeline::CaptureError;

/// Port for screen capture.
///
/// `capture` is called at most once per pipeline run. The underlying
/// OS capture stream must be torn down exactly once per run via
/// `stop_capture`, whether the capture succeeded, failed, or was
/// cancelled; the pipeline enforces this with a scoped guard.
#[async_trait]
pub trait CaptureProvider: Send + Sync {
    /// Capture the given screen region, or the whole output when
    /// `region` is `None`.
    ///
    /// # Returns
    /// Raw image bytes, or a capture error
    async fn capture(&self, region: Option<SelectionRect>) -> Result<ImageData, CaptureError>;

    /// Tear down any in-flight capture stream. Must be cheap,
    /// synchronous, and safe to call when nothing is in flight.
    fn stop_capture(&self);
}

/// Blanket implementation for boxed capture providers
#[async_trait]
impl CaptureProvider for Box<dyn CaptureProvider> {
    async fn capture(&self, region: Option<SelectionRect>) -> Result<ImageData, CaptureError> {
        self.as_ref().capture(region).await
    }

    fn stop_capture(&self) {
        self.as_ref().stop_capture()
    }
}

/// Port for resolving trigger-derived capture bounds (full screen or
/// focused window) from the OS.
#[async_trait]
pub trait ScreenLookup: Send + Sync {
    /// Bounds of the active display
    async fn display_bounds(&self) -> Result<SelectionRect, CaptureError>;

    /// Bounds of the currently focused window
    async fn focused_window_bounds(&self) -> Result<SelectionRect, CaptureError>;
}
