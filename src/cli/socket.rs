//! Unix Domain Socket communication for daemon control

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;

use super::signals::DaemonCommand;
use crate::domain::capture::CaptureTrigger;

/// Socket path resolver
#[derive(Debug, Clone)]
pub struct SocketPath {
    path: PathBuf,
}

impl SocketPath {
    /// Create socket path, preferring XDG_RUNTIME_DIR
    pub fn new() -> Self {
        let path = std::env::var("XDG_RUNTIME_DIR")
            .map(|dir| PathBuf::from(dir).join("plansnap.sock"))
            .unwrap_or_else(|_| std::env::temp_dir().join("plansnap.sock"));
        Self { path }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if socket file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove socket file if it exists
    pub fn cleanup(&self) -> io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl Default for SocketPath {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one wire command line
fn parse_command(line: &str) -> Option<DaemonCommand> {
    match line.trim() {
        "area" => Some(DaemonCommand::Trigger(CaptureTrigger::MenuArea)),
        "window" => Some(DaemonCommand::Trigger(CaptureTrigger::MenuWindow)),
        "screen" => Some(DaemonCommand::Trigger(CaptureTrigger::MenuScreen)),
        "hotkey" => Some(DaemonCommand::Hotkey),
        "cancel" => Some(DaemonCommand::Cancel),
        "shutdown" => Some(DaemonCommand::Shutdown),
        _ => None,
    }
}

/// Daemon socket server - listens for commands and sends to channel
pub struct DaemonSocketServer {
    socket_path: SocketPath,
    listener: Option<UnixListener>,
}

impl DaemonSocketServer {
    /// Create a new socket server
    pub fn new(socket_path: SocketPath) -> Self {
        Self {
            socket_path,
            listener: None,
        }
    }

    /// Bind to the socket
    pub fn bind(&mut self) -> io::Result<()> {
        // Remove stale socket file if it exists
        self.socket_path.cleanup()?;

        let listener = UnixListener::bind(self.socket_path.path())?;
        self.listener = Some(listener);
        Ok(())
    }

    /// Get the socket path
    pub fn path(&self) -> &Path {
        self.socket_path.path()
    }

    /// Accept and handle connections.
    ///
    /// Each command line is forwarded to the daemon channel; the
    /// state_fn answers status queries with the current pipeline state.
    pub async fn run<F>(&self, tx: mpsc::Sender<DaemonCommand>, state_fn: F) -> io::Result<()>
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "Socket not bound"))?;

        let state_fn = std::sync::Arc::new(state_fn);
        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    let tx = tx.clone();
                    let state_fn = std::sync::Arc::clone(&state_fn);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, tx, state_fn.as_ref()).await {
                            log::warn!("socket connection error: {}", e);
                        }
                    });
                }
                Err(e) => {
                    log::warn!("socket accept error: {}", e);
                }
            }
        }
    }

    /// Cleanup socket file
    pub fn cleanup(&self) {
        let _ = self.socket_path.cleanup();
    }
}

impl Drop for DaemonSocketServer {
    fn drop(&mut self) {
        self.cleanup();
    }
}

async fn handle_connection<F>(
    stream: UnixStream,
    tx: mpsc::Sender<DaemonCommand>,
    state_fn: &F,
) -> io::Result<()>
where
    F: Fn() -> String,
{
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    if let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        let response = if trimmed == "status" {
            state_fn()
        } else if let Some(command) = parse_command(trimmed) {
            match tx.send(command).await {
                Ok(()) => "ok".to_string(),
                Err(_) => "error: daemon is shutting down".to_string(),
            }
        } else {
            format!("error: unknown command '{}'", trimmed)
        };

        writer.write_all(response.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }

    Ok(())
}

/// Client for sending commands to a running daemon
pub struct DaemonSocketClient {
    socket_path: SocketPath,
}

impl DaemonSocketClient {
    /// Create a client against the default socket path
    pub fn new() -> Self {
        Self {
            socket_path: SocketPath::new(),
        }
    }

    /// Create with custom socket path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: SocketPath::with_path(path),
        }
    }

    /// Whether a daemon socket is present
    pub fn is_daemon_running(&self) -> bool {
        self.socket_path.exists()
    }

    /// Send one command line and read the one-line response
    pub async fn send_command(&self, command: &str) -> io::Result<String> {
        let stream = UnixStream::connect(self.socket_path.path()).await?;
        let (reader, mut writer) = stream.into_split();

        writer.write_all(command.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        let mut lines = BufReader::new(reader).lines();
        Ok(lines.next_line().await?.unwrap_or_default())
    }
}

impl Default for DaemonSocketClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_commands() {
        assert_eq!(
            parse_command("area"),
            Some(DaemonCommand::Trigger(CaptureTrigger::MenuArea))
        );
        assert_eq!(
            parse_command("window\n"),
            Some(DaemonCommand::Trigger(CaptureTrigger::MenuWindow))
        );
        assert_eq!(
            parse_command("screen"),
            Some(DaemonCommand::Trigger(CaptureTrigger::MenuScreen))
        );
        assert_eq!(parse_command("hotkey"), Some(DaemonCommand::Hotkey));
        assert_eq!(parse_command("cancel"), Some(DaemonCommand::Cancel));
        assert_eq!(parse_command("shutdown"), Some(DaemonCommand::Shutdown));
    }

    #[test]
    fn parse_unknown_command() {
        assert_eq!(parse_command("flip"), None);
        assert_eq!(parse_command(""), None);
    }

    #[tokio::test]
    async fn server_forwards_commands_and_answers_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.sock");

        let mut server = DaemonSocketServer::new(SocketPath::with_path(&path));
        server.bind().unwrap();

        let (tx, mut rx) = mpsc::channel(4);
        tokio::spawn(async move {
            let _ = server.run(tx, || "idle".to_string()).await;
        });

        let client = DaemonSocketClient::with_path(&path);
        assert!(client.is_daemon_running());

        assert_eq!(client.send_command("area").await.unwrap(), "ok");
        assert_eq!(
            rx.recv().await,
            Some(DaemonCommand::Trigger(CaptureTrigger::MenuArea))
        );

        assert_eq!(client.send_command("status").await.unwrap(), "idle");

        let response = client.send_command("flip").await.unwrap();
        assert!(response.starts_with("error:"));
    }
}
