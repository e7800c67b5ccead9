//! Capture trigger variants

use std::fmt;
use std::str::FromStr;

/// What started a capture run, and in which mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureTrigger {
    /// Global hotkey; behaves like an area capture
    Hotkey,
    /// Menu/CLI "capture area"
    MenuArea,
    /// Menu/CLI "capture window"
    MenuWindow,
    /// Menu/CLI "capture screen"
    MenuScreen,
}

impl CaptureTrigger {
    /// Whether this trigger requires interactive region selection.
    /// The hotkey is bound to area capture.
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Hotkey | Self::MenuArea)
    }

    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hotkey => "hotkey",
            Self::MenuArea => "area",
            Self::MenuWindow => "window",
            Self::MenuScreen => "screen",
        }
    }
}

impl fmt::Display for CaptureTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CaptureTrigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hotkey" => Ok(Self::Hotkey),
            "area" => Ok(Self::MenuArea),
            "window" => Ok(Self::MenuWindow),
            "screen" => Ok(Self::MenuScreen),
            other => Err(format!("unknown capture trigger: {}", other)),
        }
    }
}
