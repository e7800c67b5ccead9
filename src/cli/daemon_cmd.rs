//! Daemon command handler - sends commands to a running daemon

use super::args::DaemonAction;
use super::presenter::Presenter;
use super::socket::DaemonSocketClient;

/// Handle daemon subcommand
pub async fn handle_daemon_command(
    action: DaemonAction,
    presenter: &Presenter,
) -> Result<(), String> {
    let client = DaemonSocketClient::new();

    if !client.is_daemon_running() {
        return Err("No daemon running. Start with: plansnap --daemon".to_string());
    }

    let cmd = match action {
        DaemonAction::Area => "area",
        DaemonAction::Window => "window",
        DaemonAction::Screen => "screen",
        DaemonAction::Hotkey => "hotkey",
        DaemonAction::Cancel => "cancel",
        DaemonAction::Status => "status",
    };

    let response = client
        .send_command(cmd)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    let response = response.trim();

    match action {
        DaemonAction::Status => {
            presenter.info(&format!("Daemon status: {}", response));
        }
        _ => {
            if let Some(stripped) = response.strip_prefix("error:") {
                return Err(stripped.trim().to_string());
            }
            presenter.info(&format!("Command sent: {}", cmd));
        }
    }

    Ok(())
}
