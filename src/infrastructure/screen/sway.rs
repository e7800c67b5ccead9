//! swaymsg-based screen lookup adapter (wayland)

use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::application::ports::ScreenLookup;
use crate::domain::geometry::SelectionRect;
use crate::domain::pipeline::CaptureError;

#[derive(Debug, Clone, Copy, Deserialize)]
struct NodeRect {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl From<NodeRect> for SelectionRect {
    fn from(r: NodeRect) -> Self {
        SelectionRect::new(r.x, r.y, r.width, r.height)
    }
}

#[derive(Debug, Deserialize)]
struct Output {
    #[serde(default)]
    focused: bool,
    #[serde(default)]
    active: bool,
    rect: NodeRect,
}

#[derive(Debug, Deserialize)]
struct TreeNode {
    #[serde(default)]
    focused: bool,
    rect: NodeRect,
    #[serde(default)]
    nodes: Vec<TreeNode>,
    #[serde(default)]
    floating_nodes: Vec<TreeNode>,
}

/// Resolves display and focused-window bounds by querying the sway
/// compositor (`swaymsg -t get_outputs` / `get_tree`).
pub struct SwayScreenLookup;

impl SwayScreenLookup {
    /// Create a new sway screen lookup
    pub fn new() -> Self {
        Self
    }

    async fn swaymsg(kind: &str) -> Result<Vec<u8>, CaptureError> {
        let output = Command::new("swaymsg")
            .args(["-t", kind, "-r"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureError::CaptureFailed("swaymsg not found".to_string())
                } else {
                    CaptureError::CaptureFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(CaptureError::NoDisplay);
        }
        Ok(output.stdout)
    }

    /// Pick the focused output, falling back to any active one
    fn pick_output(outputs: Vec<Output>) -> Option<SelectionRect> {
        let focused = outputs.iter().find(|o| o.focused).map(|o| o.rect);
        focused
            .or_else(|| outputs.iter().find(|o| o.active).map(|o| o.rect))
            .map(Into::into)
    }

    /// Depth-first search for the focused node's rect
    fn find_focused(node: &TreeNode) -> Option<SelectionRect> {
        if node.focused {
            return Some(node.rect.into());
        }
        node.nodes
            .iter()
            .chain(node.floating_nodes.iter())
            .find_map(Self::find_focused)
    }
}

impl Default for SwayScreenLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScreenLookup for SwayScreenLookup {
    async fn display_bounds(&self) -> Result<SelectionRect, CaptureError> {
        let raw = Self::swaymsg("get_outputs").await?;
        let outputs: Vec<Output> = serde_json::from_slice(&raw)
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        Self::pick_output(outputs).ok_or(CaptureError::NoDisplay)
    }

    async fn focused_window_bounds(&self) -> Result<SelectionRect, CaptureError> {
        let raw = Self::swaymsg("get_tree").await?;
        let tree: TreeNode = serde_json::from_slice(&raw)
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        Self::find_focused(&tree)
            .ok_or_else(|| CaptureError::CaptureFailed("no focused window".to_string()))
    }
}
