//! Domain error types

use thiserror::Error;

/// Error when parsing a selection rect geometry string
#[derive(Debug, Clone, Error)]
#[error("Invalid geometry: \"{input}\". Expected format: \"X,Y WxH\" (e.g., 10,10 200x150)")]
pub struct RectParseError {
    pub input: String,
}

/// Error when parsing a hotkey combination string
#[derive(Debug, Clone, Error)]
#[error("Invalid hotkey: \"{input}\". Expected format: <modifiers>+<key> (e.g., cmd+ctrl+alt+l)")]
pub struct KeyComboParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
