//! Hotkey registration port interface

use std::sync::Arc;

use thiserror::Error;

use crate::domain::hotkey::KeyCombo;

/// Hotkey registration errors
#[derive(Debug, Clone, Error)]
pub enum HotkeyError {
    #[error("Failed to register hotkey '{combo}': {message}")]
    RegistrationFailed { combo: String, message: String },
}

/// Callback invoked when a registered combo fires
pub type HotkeyCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by registration, used to unregister
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyHandle {
    pub id: u64,
    pub combo: KeyCombo,
}

/// Port for global hotkey registration.
///
/// Delivery contract: at most one live callback per combo.
/// Registering a combo that already has a live callback replaces the
/// prior registration; the stale handle's `unregister` becomes a no-op.
pub trait HotkeyRegistry: Send + Sync {
    /// Register a callback for a key combination
    fn register(
        &self,
        combo: KeyCombo,
        callback: HotkeyCallback,
    ) -> Result<HotkeyHandle, HotkeyError>;

    /// Unregister a previously returned handle
    fn unregister(&self, handle: HotkeyHandle);
}
