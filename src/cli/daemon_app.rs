//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{
    CaptureOutcome, CaptureStore, HotkeyRegistry, Notifier, PlanSink,
};
use crate::application::{CapturePipeline, PipelineConfig, RunOutcome};
use crate::domain::capture::{CaptureMetadata, CaptureTrigger};
use crate::domain::hotkey::KeyCombo;
use crate::infrastructure::{
    CommandHotkeys, FsCaptureStore, GrimCapture, HttpExtractionClient, NotifyRustNotifier,
    NullNotifier, SlurpOverlay, SwayScreenLookup, TesseractRecognizer,
};

use super::app::{build_store, EXIT_ERROR, EXIT_SUCCESS};
use super::args::DaemonOptions;
use super::pid_file::{PidFile, PidFileError};
use super::presenter::Presenter;
use super::signals::{DaemonCommand, DaemonCommandStream};
use super::socket::{DaemonSocketServer, SocketPath};

/// Sink for daemon mode: logs outcomes and persists captures when
/// saving is enabled. Desktop notifications are the pipeline's job.
struct DaemonSink {
    store: Option<FsCaptureStore>,
}

#[async_trait]
impl PlanSink for DaemonSink {
    async fn present(&self, outcome: CaptureOutcome) {
        log::info!(
            "capture ({}) produced {} plan(s) from {} characters",
            outcome.trigger,
            outcome.plans.len(),
            outcome.text.len()
        );
        for plan in &outcome.plans {
            log::info!("  plan: {} @ {}", plan.title, plan.start_time);
        }

        if let Some(ref store) = self.store {
            let metadata = CaptureMetadata::new(outcome.text.clone(), outcome.plans.clone());
            if let Err(e) = store.save(&outcome.image, &metadata).await {
                log::warn!("could not save capture: {}", e);
            }
        }
    }
}

type DaemonPipeline = CapturePipeline<
    SlurpOverlay,
    SwayScreenLookup,
    GrimCapture,
    TesseractRecognizer,
    HttpExtractionClient,
    Box<dyn Notifier>,
    DaemonSink,
>;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        match e {
            PidFileError::AlreadyRunning(pid) => {
                presenter.error(&format!("Another daemon is already running (PID: {})", pid));
            }
            _ => presenter.error(&e.to_string()),
        }
        return ExitCode::from(EXIT_ERROR);
    }

    let notifier: Box<dyn Notifier> = if options.notify {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(NullNotifier)
    };

    let pipeline: Arc<DaemonPipeline> = Arc::new(CapturePipeline::new(
        SlurpOverlay::new(),
        SwayScreenLookup::new(),
        GrimCapture::new(),
        TesseractRecognizer::new(),
        HttpExtractionClient::with_base_url(&options.api_url),
        notifier,
        DaemonSink {
            store: build_store(options.save, options.save_dir.as_deref()),
        },
        PipelineConfig {
            auth_token: options.auth_token.clone(),
            timezone: options.timezone.clone(),
            notify_success: options.notify,
        },
    ));

    // Command stream (signals + socket)
    let (mut commands, command_tx) = match DaemonCommandStream::new() {
        Ok(pair) => pair,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            let _ = pid_file.release();
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Hotkey registry: the socket's "hotkey" command dispatches the
    // registered combo, whose callback enqueues a capture trigger
    let registry = CommandHotkeys::new();
    let hotkey_tx = command_tx.clone();
    let registration = registry.register(
        options.hotkey.clone(),
        Arc::new(move || {
            // Dropped (not queued) if the channel is full
            if hotkey_tx
                .try_send(DaemonCommand::Trigger(CaptureTrigger::Hotkey))
                .is_err()
            {
                log::debug!("hotkey trigger dropped");
            }
        }),
    );
    if let Err(e) = registration {
        presenter.error(&e.to_string());
        let _ = pid_file.release();
        return ExitCode::from(EXIT_ERROR);
    }

    // Socket server answering status from the observable state
    let socket_path = SocketPath::new();
    let mut socket_server = DaemonSocketServer::new(socket_path.clone());
    if let Err(e) = socket_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        let _ = pid_file.release();
        return ExitCode::from(EXIT_ERROR);
    }

    let state_rx = pipeline.subscribe();
    let server_tx = command_tx.clone();
    tokio::spawn(async move {
        let _ = socket_server
            .run(server_tx, move || state_rx.borrow().as_str().to_string())
            .await;
    });

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | Hotkey: {} | SIGINT: exit",
        std::process::id(),
        socket_path.path().display(),
        options.hotkey
    ));

    let clean = daemon_loop(&pipeline, &mut commands, &registry, &options.hotkey, &presenter).await;

    let _ = pid_file.release();

    if clean {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

async fn daemon_loop(
    pipeline: &Arc<DaemonPipeline>,
    commands: &mut DaemonCommandStream,
    registry: &CommandHotkeys,
    hotkey: &KeyCombo,
    presenter: &Presenter,
) -> bool {
    loop {
        match commands.recv().await {
            Some(DaemonCommand::Trigger(trigger)) => {
                presenter.daemon_status(&format!("Capture requested ({})", trigger));
                let runner = Arc::clone(pipeline);
                tokio::spawn(async move {
                    match runner.run(trigger).await {
                        RunOutcome::Completed { plan_count } => {
                            log::info!("run completed with {} plan(s)", plan_count);
                        }
                        RunOutcome::NoSelection => {
                            log::debug!("selection cancelled");
                        }
                        RunOutcome::Cancelled => {
                            log::info!("run cancelled");
                        }
                        RunOutcome::Failed(e) => {
                            log::warn!("run failed: {}", e);
                        }
                        RunOutcome::Busy => {
                            // Single-flight: concurrent triggers are
                            // dropped, not queued
                            log::debug!("trigger dropped: pipeline busy");
                        }
                    }
                });
            }
            Some(DaemonCommand::Hotkey) => {
                if !registry.dispatch(hotkey) {
                    presenter.warn("No hotkey registered");
                }
            }
            Some(DaemonCommand::Cancel) => {
                pipeline.cancel().await;
                presenter.daemon_status("Cancelled");
            }
            Some(DaemonCommand::Shutdown) => {
                pipeline.cancel().await;
                presenter.daemon_status("Shutting down...");
                return true;
            }
            None => {
                // Channel closed
                return false;
            }
        }
    }
}
