//! Pointer-event-driven region selection
//!
//! Bridges an overlay surface to the domain gesture machine: the
//! surface feeds pointer events into a channel, and `PointerSelection`
//! drives a `RegionSelector` until the gesture finalizes or aborts.
//! Rendering is the surface's problem; only the coordination contract
//! lives here.

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::domain::geometry::{Point, RegionSelector, SelectionRect};

use super::ports::SelectionOverlay;

/// Pointer events emitted by an overlay surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at a point; anchors the drag
    Down(Point),
    /// Pointer moved while dragging
    Move(Point),
    /// Button released; finalizes the gesture
    Up,
    /// Escape pressed; aborts the gesture
    Cancel,
}

/// `SelectionOverlay` backed by a pointer-event stream.
///
/// One `select_region` call consumes events until the gesture ends.
/// Closing the sender aborts the gesture.
pub struct PointerSelection {
    events: Mutex<mpsc::Receiver<PointerEvent>>,
}

impl PointerSelection {
    /// Create a selection driver and the sender its surface feeds
    pub fn channel(buffer: usize) -> (mpsc::Sender<PointerEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (
            tx,
            Self {
                events: Mutex::new(rx),
            },
        )
    }
}

#[async_trait]
impl SelectionOverlay for PointerSelection {
    async fn select_region(&self) -> Option<SelectionRect> {
        let mut events = self.events.lock().await;
        let mut selector = RegionSelector::new();
        selector.begin();

        loop {
            match events.recv().await {
                Some(PointerEvent::Down(point)) => selector.on_pointer_down(point),
                Some(PointerEvent::Move(point)) => selector.on_pointer_move(point),
                Some(PointerEvent::Up) => {
                    // Only a finalized drag ends the gesture; a stray
                    // release before any press is ignored.
                    if selector.is_dragging() {
                        return selector.on_pointer_up();
                    }
                }
                Some(PointerEvent::Cancel) => {
                    selector.cancel();
                    return None;
                }
                None => {
                    // Surface went away
                    selector.cancel();
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn feed(tx: &mpsc::Sender<PointerEvent>, events: &[PointerEvent]) {
        for e in events {
            tx.send(*e).await.unwrap();
        }
    }

    #[tokio::test]
    async fn drag_finalizes_selection() {
        let (tx, selection) = PointerSelection::channel(16);

        feed(
            &tx,
            &[
                PointerEvent::Down(Point::new(10.0, 10.0)),
                PointerEvent::Move(Point::new(100.0, 80.0)),
                PointerEvent::Move(Point::new(210.0, 160.0)),
                PointerEvent::Up,
            ],
        )
        .await;

        let rect = selection.select_region().await.unwrap();
        assert_eq!(rect, SelectionRect::new(10.0, 10.0, 200.0, 150.0));
    }

    #[tokio::test]
    async fn cancel_aborts_gesture() {
        let (tx, selection) = PointerSelection::channel(16);

        feed(
            &tx,
            &[
                PointerEvent::Down(Point::new(10.0, 10.0)),
                PointerEvent::Move(Point::new(300.0, 300.0)),
                PointerEvent::Cancel,
            ],
        )
        .await;

        assert_eq!(selection.select_region().await, None);
    }

    #[tokio::test]
    async fn tiny_drag_yields_none() {
        let (tx, selection) = PointerSelection::channel(16);

        feed(
            &tx,
            &[
                PointerEvent::Down(Point::new(10.0, 10.0)),
                PointerEvent::Move(Point::new(15.0, 300.0)),
                PointerEvent::Up,
            ],
        )
        .await;

        assert_eq!(selection.select_region().await, None);
    }

    #[tokio::test]
    async fn stray_up_before_down_is_ignored() {
        let (tx, selection) = PointerSelection::channel(16);

        feed(
            &tx,
            &[
                PointerEvent::Up,
                PointerEvent::Down(Point::new(0.0, 0.0)),
                PointerEvent::Move(Point::new(50.0, 50.0)),
                PointerEvent::Up,
            ],
        )
        .await;

        let rect = selection.select_region().await.unwrap();
        assert_eq!(rect, SelectionRect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[tokio::test]
    async fn closed_surface_aborts() {
        let (tx, selection) = PointerSelection::channel(16);
        feed(&tx, &[PointerEvent::Down(Point::new(0.0, 0.0))]).await;
        drop(tx);

        assert_eq!(selection.select_region().await, None);
    }
}
