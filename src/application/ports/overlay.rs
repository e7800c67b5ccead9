//! Region selection port interface

use async_trait::async_trait;

use crate::domain::geometry::SelectionRect;

/// Port for interactive region selection.
///
/// Resolves once per call: `Some(rect)` with a finalized selection
/// meeting the minimum size, or `None` when the user cancelled or the
/// selection was too small. Overlay failures also resolve to `None`;
/// "no selection" is a silent outcome, never an error.
#[async_trait]
pub trait SelectionOverlay: Send + Sync {
    /// Run one selection gesture and return the finalized rect, if any
    async fn select_region(&self) -> Option<SelectionRect>;
}

/// Blanket implementation for boxed overlay types
#[async_trait]
impl SelectionOverlay for Box<dyn SelectionOverlay> {
    async fn select_region(&self) -> Option<SelectionRect> {
        self.as_ref().select_region().await
    }
}
