//! Region selection gesture state machine

use super::point::Point;
use super::rect::SelectionRect;

/// Tracks a pointer-drag gesture and produces a finalized rectangle.
///
/// Pure geometry, no knowledge of capture or what happens to the rect.
///
/// State machine:
///   IDLE -> DRAGGING (on_pointer_down)
///   DRAGGING -> IDLE (on_pointer_up, finalizes)
///   any -> IDLE (cancel, always yields no selection)
#[derive(Debug, Default)]
pub struct RegionSelector {
    anchor: Option<Point>,
    rect: SelectionRect,
    dragging: bool,
}

impl RegionSelector {
    /// Create a new selector in idle state with an empty rect
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to an empty rect, not dragging
    pub fn begin(&mut self) {
        self.anchor = None;
        self.rect = SelectionRect::ZERO;
        self.dragging = false;
    }

    /// Record the drag anchor and enter the dragging state.
    /// A second pointer-down while dragging re-anchors the gesture.
    pub fn on_pointer_down(&mut self, point: Point) {
        self.anchor = Some(point);
        self.rect = SelectionRect::ZERO;
        self.dragging = true;
    }

    /// Recompute the rect as the bounding box of the anchor and the
    /// current point. Ignored unless dragging.
    pub fn on_pointer_move(&mut self, point: Point) {
        if !self.dragging {
            return;
        }
        if let Some(anchor) = self.anchor {
            self.rect = SelectionRect::from_corners(anchor, point);
        }
    }

    /// Finalize the gesture. Returns the selected rect, or `None` when
    /// either dimension is below the minimum threshold ("no selection").
    pub fn on_pointer_up(&mut self) -> Option<SelectionRect> {
        if !self.dragging {
            return None;
        }
        self.dragging = false;

        let finalized = self.rect.normalized();
        self.rect = finalized;

        if finalized.is_empty() {
            None
        } else {
            Some(finalized)
        }
    }

    /// Abort the gesture. Always yields "no selection", whatever the
    /// drag state.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.rect = SelectionRect::ZERO;
        self.dragging = false;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// The current (live) rect, for overlay rendering
    pub fn rect(&self) -> SelectionRect {
        self.rect
    }
}
