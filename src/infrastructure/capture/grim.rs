//! grim-based screen capture adapter (wayland)

use std::process::Stdio;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};

use crate::application::ports::CaptureProvider;
use crate::domain::capture::{ImageData, ImageMimeType};
use crate::domain::geometry::SelectionRect;
use crate::domain::pipeline::CaptureError;

/// Screen capture via the `grim` screenshot tool.
///
/// Regions are passed as `-g "X,Y WxH"`; without a region the whole
/// output is captured. PNG bytes arrive on stdout. The in-flight child
/// stays in a tracked slot while its output is drained, so
/// `stop_capture` can tear it down mid-run; killing the child closes
/// stdout and unblocks the read.
pub struct GrimCapture {
    child: Mutex<Option<Child>>,
}

impl GrimCapture {
    /// Create a new grim capture provider
    pub fn new() -> Self {
        Self {
            child: Mutex::new(None),
        }
    }

    fn build_args(region: Option<SelectionRect>) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(rect) = region {
            args.push("-g".to_string());
            args.push(rect.to_string());
        }
        // "-" writes the PNG to stdout
        args.push("-".to_string());
        args
    }

    fn spawn(args: &[String]) -> Result<Child, CaptureError> {
        Command::new("grim")
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    CaptureError::CaptureFailed("grim not found. Please install grim.".to_string())
                } else {
                    CaptureError::CaptureFailed(e.to_string())
                }
            })
    }

    /// Map a failed grim run onto the capture error taxonomy
    fn classify_failure(stderr: &str) -> CaptureError {
        let lower = stderr.to_ascii_lowercase();
        if lower.contains("permission") || lower.contains("denied") {
            CaptureError::PermissionDenied
        } else if lower.contains("no outputs") || lower.contains("no such output") {
            CaptureError::NoDisplay
        } else {
            CaptureError::CaptureFailed(stderr.trim().to_string())
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Child>> {
        self.child.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for GrimCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureProvider for GrimCapture {
    async fn capture(&self, region: Option<SelectionRect>) -> Result<ImageData, CaptureError> {
        let args = Self::build_args(region);
        log::debug!("spawning grim {:?}", args);

        let mut child = Self::spawn(&args)?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| CaptureError::CaptureFailed("missing stdout pipe".to_string()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| CaptureError::CaptureFailed("missing stderr pipe".to_string()))?;

        // Park the child where stop_capture can reach it
        self.slot().replace(child);

        let mut png = Vec::new();
        let read_result = stdout.read_to_end(&mut png).await;
        let mut errors = Vec::new();
        let _ = stderr.read_to_end(&mut errors).await;

        let child = self.slot().take();
        let Some(mut child) = child else {
            // stop_capture tore the run down
            return Err(CaptureError::CaptureFailed("capture stopped".to_string()));
        };

        let status = child
            .wait()
            .await
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;
        read_result.map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&errors);
            return Err(Self::classify_failure(&stderr));
        }

        if png.is_empty() {
            return Err(CaptureError::CaptureFailed("empty capture output".to_string()));
        }

        Ok(ImageData::new(png, ImageMimeType::Png))
    }

    fn stop_capture(&self) {
        if let Some(mut child) = self.slot().take() {
            log::debug!("killing in-flight grim capture");
            let _ = child.start_kill();
        }
    }
}
