//! slurp-based region selection adapter (wayland)

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::SelectionOverlay;
use crate::domain::geometry::SelectionRect;

/// Interactive region selection via the `slurp` picker.
///
/// slurp exits non-zero when the user presses escape; that and any
/// launch failure map to "no selection". Sub-threshold picks are
/// normalized away as well.
pub struct SlurpOverlay;

impl SlurpOverlay {
    /// Create a new slurp overlay
    pub fn new() -> Self {
        Self
    }

    fn parse_output(stdout: &str) -> Option<SelectionRect> {
        let rect: SelectionRect = stdout.trim().parse().ok()?;
        let rect = rect.normalized();
        if rect.is_empty() {
            None
        } else {
            Some(rect)
        }
    }
}

impl Default for SlurpOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SelectionOverlay for SlurpOverlay {
    async fn select_region(&self) -> Option<SelectionRect> {
        let output = Command::new("slurp")
            .args(["-f", "%x,%y %wx%h"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                log::warn!("could not launch slurp: {}", e);
                return None;
            }
        };

        if !output.status.success() {
            // User pressed escape
            return None;
        }

        Self::parse_output(&String::from_utf8_lossy(&output.stdout))
    }
}
