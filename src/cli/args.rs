//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::capture::CaptureTrigger;
use crate::domain::hotkey::KeyCombo;

/// PlanSnap - capture screen regions into structured plans
#[derive(Parser, Debug)]
#[command(name = "plansnap")]
#[command(version = "1.0.0")]
#[command(about = "Capture a screen region, OCR it, and extract structured plans")]
#[command(long_about = None)]
pub struct Cli {
    /// Capture mode for one-shot capture
    #[arg(short = 'm', long, value_name = "MODE", conflicts_with = "daemon")]
    pub mode: Option<ModeArg>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Save the capture image and metadata to disk
    #[arg(short = 's', long)]
    pub save: bool,

    /// Directory for saved captures
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<String>,

    /// IANA timezone sent to the extraction service
    #[arg(short = 't', long, value_name = "TZ")]
    pub timezone: Option<String>,

    /// Extraction service base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Run as daemon (control via: plansnap daemon area/cancel/status)
    #[arg(long)]
    pub daemon: bool,

    /// Hotkey combo dispatched by 'plansnap daemon hotkey'
    #[arg(long, value_name = "COMBO", requires = "daemon")]
    pub hotkey: Option<String>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to running daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
}

/// Daemon control actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DaemonAction {
    /// Trigger an interactive area capture
    Area,
    /// Trigger a focused-window capture
    Window,
    /// Trigger a whole-screen capture
    Screen,
    /// Deliver the registered hotkey
    Hotkey,
    /// Cancel the in-flight capture run
    Cancel,
    /// Show daemon status
    Status,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Capture mode argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Area,
    Window,
    Screen,
}

impl From<ModeArg> for CaptureTrigger {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Area => CaptureTrigger::MenuArea,
            ModeArg::Window => CaptureTrigger::MenuWindow,
            ModeArg::Screen => CaptureTrigger::MenuScreen,
        }
    }
}

/// Parsed one-shot capture options
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub trigger: CaptureTrigger,
    pub notify: bool,
    pub save: bool,
    pub save_dir: Option<String>,
    pub timezone: String,
    pub api_url: String,
    pub auth_token: Option<String>,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub hotkey: KeyCombo,
    pub notify: bool,
    pub save: bool,
    pub save_dir: Option<String>,
    pub timezone: String,
    pub api_url: String,
    pub auth_token: Option<String>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "api_url",
    "auth_token",
    "timezone",
    "hotkey",
    "notify",
    "save_captures",
    "save_dir",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["plansnap"]);
        assert!(cli.mode.is_none());
        assert!(!cli.notify);
        assert!(!cli.save);
        assert!(cli.save_dir.is_none());
        assert!(cli.timezone.is_none());
        assert!(cli.api_url.is_none());
        assert!(!cli.daemon);
        assert!(cli.hotkey.is_none());
    }

    #[test]
    fn cli_parses_mode() {
        let cli = Cli::parse_from(["plansnap", "-m", "window"]);
        assert_eq!(cli.mode, Some(ModeArg::Window));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["plansnap", "-n", "-s"]);
        assert!(cli.notify);
        assert!(cli.save);
    }

    #[test]
    fn cli_parses_daemon_with_hotkey() {
        let cli = Cli::parse_from(["plansnap", "--daemon", "--hotkey", "ctrl+alt+l"]);
        assert!(cli.daemon);
        assert_eq!(cli.hotkey, Some("ctrl+alt+l".to_string()));
    }

    #[test]
    fn hotkey_requires_daemon() {
        assert!(Cli::try_parse_from(["plansnap", "--hotkey", "ctrl+alt+l"]).is_err());
    }

    #[test]
    fn mode_conflicts_with_daemon() {
        assert!(Cli::try_parse_from(["plansnap", "--daemon", "-m", "area"]).is_err());
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["plansnap", "config", "set", "timezone", "Asia/Seoul"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "timezone");
            assert_eq!(value, "Asia/Seoul");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_daemon_trigger() {
        let cli = Cli::parse_from(["plansnap", "daemon", "area"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Daemon {
                action: DaemonAction::Area
            })
        ));
    }

    #[test]
    fn mode_arg_converts_to_trigger() {
        assert_eq!(CaptureTrigger::from(ModeArg::Area), CaptureTrigger::MenuArea);
        assert_eq!(
            CaptureTrigger::from(ModeArg::Window),
            CaptureTrigger::MenuWindow
        );
        assert_eq!(
            CaptureTrigger::from(ModeArg::Screen),
            CaptureTrigger::MenuScreen
        );
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("api_url"));
        assert!(is_valid_config_key("auth_token"));
        assert!(is_valid_config_key("hotkey"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
