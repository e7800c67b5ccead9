//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::hotkey::KeyCombo;

/// Default extraction service base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_url: Option<String>,
    pub auth_token: Option<String>,
    pub timezone: Option<String>,
    pub hotkey: Option<String>,
    pub notify: Option<bool>,
    pub save_captures: Option<bool>,
    pub save_dir: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            api_url: Some(DEFAULT_API_URL.to_string()),
            auth_token: None,
            timezone: Some("UTC".to_string()),
            hotkey: Some(KeyCombo::default_capture().to_string()),
            notify: Some(false),
            save_captures: Some(false),
            save_dir: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_url: other.api_url.or(self.api_url),
            auth_token: other.auth_token.or(self.auth_token),
            timezone: other.timezone.or(self.timezone),
            hotkey: other.hotkey.or(self.hotkey),
            notify: other.notify.or(self.notify),
            save_captures: other.save_captures.or(self.save_captures),
            save_dir: other.save_dir.or(self.save_dir),
        }
    }

    /// Get the API base URL, or the default if not set
    pub fn api_url_or_default(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Get the timezone, falling back to the TZ env var, then UTC.
    /// The extraction service localizes timestamps with this value.
    pub fn timezone_or_default(&self) -> String {
        self.timezone
            .clone()
            .or_else(|| std::env::var("TZ").ok().filter(|s| !s.is_empty()))
            .unwrap_or_else(|| "UTC".to_string())
    }

    /// Get the hotkey as a parsed KeyCombo, or the default if not
    /// set/invalid
    pub fn hotkey_or_default(&self) -> KeyCombo {
        self.hotkey
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(KeyCombo::default_capture)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get save_captures setting, or false if not set
    pub fn save_captures_or_default(&self) -> bool {
        self.save_captures.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.api_url, Some(DEFAULT_API_URL.to_string()));
        assert!(config.auth_token.is_none());
        assert_eq!(config.timezone, Some("UTC".to_string()));
        assert_eq!(config.hotkey, Some("cmd+ctrl+alt+l".to_string()));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.save_captures, Some(false));
        assert!(config.save_dir.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.api_url.is_none());
        assert!(config.auth_token.is_none());
        assert!(config.timezone.is_none());
        assert!(config.hotkey.is_none());
        assert!(config.notify.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            api_url: Some("http://base".to_string()),
            auth_token: Some("base_token".to_string()),
            timezone: Some("UTC".to_string()),
            ..Default::default()
        };

        let other = AppConfig {
            api_url: Some("http://other".to_string()),
            auth_token: None, // Should not override
            timezone: Some("Asia/Seoul".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.api_url, Some("http://other".to_string()));
        assert_eq!(merged.auth_token, Some("base_token".to_string()));
        assert_eq!(merged.timezone, Some("Asia/Seoul".to_string()));
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let base = AppConfig {
            auth_token: Some("token".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let merged = base.merge(AppConfig::empty());

        assert_eq!(merged.auth_token, Some("token".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn hotkey_or_default_parses() {
        let config = AppConfig {
            hotkey: Some("ctrl+alt+s".to_string()),
            ..Default::default()
        };
        assert_eq!(config.hotkey_or_default().to_string(), "ctrl+alt+s");
    }

    #[test]
    fn hotkey_or_default_uses_default_on_invalid() {
        let config = AppConfig {
            hotkey: Some("not a combo".to_string()),
            ..Default::default()
        };
        assert_eq!(config.hotkey_or_default(), KeyCombo::default_capture());
    }

    #[test]
    fn boolean_defaults() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
        assert!(!config.save_captures_or_default());
    }

    #[test]
    fn api_url_or_default() {
        assert_eq!(AppConfig::empty().api_url_or_default(), DEFAULT_API_URL);
    }
}
