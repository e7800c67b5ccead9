//! Main app runner for one-shot mode

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{CaptureOutcome, CaptureStore, ConfigStore, Notifier, PlanSink};
use crate::application::{CapturePipeline, PipelineConfig, RunOutcome};
use crate::domain::capture::CaptureMetadata;
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    FsCaptureStore, GrimCapture, HttpExtractionClient, NotifyRustNotifier, NullNotifier,
    SlurpOverlay, SwayScreenLookup, TesseractRecognizer, XdgConfigStore,
};

use super::args::CaptureOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Sink for one-shot mode: prints the recognized text and plan table
/// to stdout, and optionally persists the capture.
pub struct CliSink {
    store: Option<FsCaptureStore>,
}

impl CliSink {
    /// Create a sink, persisting captures when a store is given
    pub fn new(store: Option<FsCaptureStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlanSink for CliSink {
    async fn present(&self, outcome: CaptureOutcome) {
        let presenter = Presenter::new();

        if !outcome.text.is_empty() {
            presenter.output(&outcome.text);
            presenter.output("");
        }
        presenter.plan_table(&outcome.plans);

        if let Some(ref store) = self.store {
            let metadata = CaptureMetadata::new(outcome.text.clone(), outcome.plans.clone());
            match store.save(&outcome.image, &metadata).await {
                Ok(path) => presenter.info(&format!("Saved capture to {}", path.display())),
                Err(e) => presenter.warn(&format!("Could not save capture: {}", e)),
            }
        }
    }
}

/// Build the capture store for `--save`, honoring a custom directory
pub fn build_store(save: bool, save_dir: Option<&str>) -> Option<FsCaptureStore> {
    if !save {
        return None;
    }
    match save_dir {
        Some(dir) => Some(FsCaptureStore::with_base_dir(dir)),
        None => match FsCaptureStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("capture saving disabled: {}", e);
                None
            }
        },
    }
}

/// Run a one-shot capture
pub async fn run_capture(options: CaptureOptions) -> ExitCode {
    let presenter = Presenter::new();

    let notifier: Box<dyn Notifier> = if options.notify {
        Box::new(NotifyRustNotifier::new())
    } else {
        Box::new(NullNotifier)
    };

    let sink = CliSink::new(build_store(options.save, options.save_dir.as_deref()));

    let pipeline = Arc::new(CapturePipeline::new(
        SlurpOverlay::new(),
        SwayScreenLookup::new(),
        GrimCapture::new(),
        TesseractRecognizer::new(),
        HttpExtractionClient::with_base_url(&options.api_url),
        notifier,
        sink,
        PipelineConfig {
            auth_token: options.auth_token.clone(),
            timezone: options.timezone.clone(),
            notify_success: options.notify,
        },
    ));

    // Ctrl+C cancels the in-flight run
    let canceller = Arc::clone(&pipeline);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel().await;
        }
    });

    match pipeline.run(options.trigger).await {
        RunOutcome::Completed { plan_count } => {
            presenter.success(&format!(
                "Capture processed ({} plan{})",
                plan_count,
                if plan_count == 1 { "" } else { "s" }
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        RunOutcome::NoSelection => {
            presenter.info("Selection cancelled");
            ExitCode::from(EXIT_SUCCESS)
        }
        RunOutcome::Cancelled => {
            presenter.warn("Capture cancelled");
            ExitCode::from(EXIT_ERROR)
        }
        RunOutcome::Failed(e) => {
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
        RunOutcome::Busy => {
            // One-shot mode never has a concurrent run
            presenter.warn("Pipeline busy");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file, env, and CLI.
/// A missing auth token is not fatal here; the pipeline reports
/// `Unauthenticated` at the extraction stage.
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        auth_token: env::var("PLANSNAP_TOKEN").ok().filter(|s| !s.is_empty()),
        api_url: env::var("PLANSNAP_API_URL").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
