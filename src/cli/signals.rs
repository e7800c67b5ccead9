//! Signal handlers for one-shot and daemon modes

use tokio::sync::mpsc;

use crate::domain::capture::CaptureTrigger;

/// Commands driving the daemon loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonCommand {
    /// Start a capture run
    Trigger(CaptureTrigger),
    /// Deliver the registered hotkey through the registry
    Hotkey,
    /// Cancel the in-flight run
    Cancel,
    /// Shut the daemon down (SIGINT/SIGTERM or socket)
    Shutdown,
}

/// Daemon command stream.
///
/// Merges OS shutdown signals (SIGINT/SIGTERM) with commands arriving
/// from other sources (the IPC socket server) into one channel.
pub struct DaemonCommandStream {
    receiver: mpsc::Receiver<DaemonCommand>,
}

impl DaemonCommandStream {
    /// Create the stream plus a sender for the socket server
    pub fn new() -> Result<(Self, mpsc::Sender<DaemonCommand>), std::io::Error> {
        let (tx, rx) = mpsc::channel(16);

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigint = signal(SignalKind::interrupt())?;
            let int_tx = tx.clone();
            tokio::spawn(async move {
                while sigint.recv().await.is_some() {
                    if int_tx.send(DaemonCommand::Shutdown).await.is_err() {
                        break;
                    }
                }
            });

            let mut sigterm = signal(SignalKind::terminate())?;
            let term_tx = tx.clone();
            tokio::spawn(async move {
                while sigterm.recv().await.is_some() {
                    if term_tx.send(DaemonCommand::Shutdown).await.is_err() {
                        break;
                    }
                }
            });
        }

        Ok((Self { receiver: rx }, tx))
    }

    /// Receive the next command. `None` means every sender is gone.
    pub async fn recv(&mut self) -> Option<DaemonCommand> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_flow_through_the_stream() {
        let (mut stream, tx) = DaemonCommandStream::new().unwrap();

        tx.send(DaemonCommand::Trigger(CaptureTrigger::MenuArea))
            .await
            .unwrap();
        tx.send(DaemonCommand::Cancel).await.unwrap();

        assert_eq!(
            stream.recv().await,
            Some(DaemonCommand::Trigger(CaptureTrigger::MenuArea))
        );
        assert_eq!(stream.recv().await, Some(DaemonCommand::Cancel));
    }
}
