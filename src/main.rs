//! PlanSnap CLI entry point

use std::process::ExitCode;

use clap::Parser;

use plansnap::cli::{
    app::{load_merged_config, run_capture, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands, ModeArg},
    config_cmd::handle_config_command,
    daemon_app::run_daemon,
    daemon_cmd::handle_daemon_command,
    presenter::Presenter,
    CaptureOptions, DaemonOptions,
};
use plansnap::domain::config::AppConfig;
use plansnap::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Daemon { action }) => {
            if let Err(e) = handle_daemon_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        api_url: cli.api_url.clone(),
        auth_token: None, // Token comes from env/file only
        timezone: cli.timezone.clone(),
        hotkey: cli.hotkey.clone(),
        notify: if cli.notify { Some(true) } else { None },
        save_captures: if cli.save { Some(true) } else { None },
        save_dir: cli.save_dir.clone(),
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    if cli.daemon {
        // Validate the hotkey before committing to daemon mode
        let hotkey = match config.hotkey.as_ref() {
            Some(s) => match s.parse() {
                Ok(combo) => combo,
                Err(e) => {
                    presenter.error(&format!("{}", e));
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
            },
            None => plansnap::domain::hotkey::KeyCombo::default_capture(),
        };

        let options = DaemonOptions {
            hotkey,
            notify: config.notify_or_default(),
            save: config.save_captures_or_default(),
            save_dir: config.save_dir.clone(),
            timezone: config.timezone_or_default(),
            api_url: config.api_url_or_default(),
            auth_token: config.auth_token.clone(),
        };

        run_daemon(options).await
    } else {
        let options = CaptureOptions {
            trigger: cli.mode.unwrap_or(ModeArg::Area).into(),
            notify: config.notify_or_default(),
            save: config.save_captures_or_default(),
            save_dir: config.save_dir.clone(),
            timezone: config.timezone_or_default(),
            api_url: config.api_url_or_default(),
            auth_token: config.auth_token.clone(),
        };

        run_capture(options).await
    }
}
