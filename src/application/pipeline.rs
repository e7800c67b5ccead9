//! Capture-to-plan pipeline orchestrator

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

use crate::domain::capture::{CaptureTrigger, ImageData};
use crate::domain::geometry::SelectionRect;
use crate::domain::pipeline::{
    ExtractionError, InvalidStateTransition, PipelineError, PipelineMachine, PipelineState,
};

use super::ports::{
    CaptureOutcome, CaptureProvider, ExtractionClient, NotificationIcon, Notifier, PlanSink,
    ScreenLookup, SelectionOverlay, TextRecognizer,
};

/// Notification title for pipeline surfaces
const APP_NAME: &str = "PlanSnap";

/// Pipeline configuration
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Auth token for the extraction service. Absence surfaces as
    /// `Unauthenticated` at the extraction stage, before any network
    /// call.
    pub auth_token: Option<String>,
    /// IANA timezone sent with extraction requests
    pub timezone: String,
    /// Whether to show a desktop notification on success.
    /// Failures always reach the notifier.
    pub notify_success: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            auth_token: None,
            timezone: "UTC".to_string(),
            notify_success: false,
        }
    }
}

/// How a run ended.
///
/// Exactly one of `Completed`, `Failed`, `NoSelection`, or `Cancelled`
/// occurs per started run. `Busy` means the run never started.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Terminal success; plans were handed to the sink.
    /// Zero plans is still a success ("no plans found").
    Completed { plan_count: usize },
    /// Selection was cancelled or too small. Silent, not an error.
    NoSelection,
    /// The run was cancelled mid-flight
    Cancelled,
    /// Terminal failure; the notifier received the message
    Failed(PipelineError),
    /// Rejected start: another run is in flight. Never queued,
    /// never surfaced as an error notification.
    Busy,
}

/// State shared between the run task and `cancel()`, serialized by one
/// mutex. The run sequence number invalidates a superseded run's
/// transitions after cancellation.
struct Shared {
    machine: PipelineMachine,
    run_seq: u64,
    cancel: Option<CancellationToken>,
}

/// Scoped teardown of the OS capture stream: acquired on entering the
/// capture stage, `stop_capture` invoked exactly once on every exit
/// path (success, failure, cancellation).
struct CaptureGuard<'a, C: CaptureProvider> {
    provider: &'a C,
    released: bool,
}

impl<'a, C: CaptureProvider> CaptureGuard<'a, C> {
    fn new(provider: &'a C) -> Self {
        Self {
            provider,
            released: false,
        }
    }

    fn dispose(&mut self) {
        if !self.released {
            self.released = true;
            self.provider.stop_capture();
        }
    }

    fn release(mut self) {
        self.dispose();
    }
}

impl<C: CaptureProvider> Drop for CaptureGuard<'_, C> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// The capture-to-plan orchestrator.
///
/// Owns a single-flight state machine sequencing
/// selection -> capture -> recognition -> extraction, publishes
/// observable state through a watch channel, and exposes cancel.
///
/// Collaborator calls are the only suspension points; every state
/// mutation is serialized through one mutex, and the stages of a run
/// execute strictly sequentially.
pub struct CapturePipeline<O, S, C, R, X, N, P>
where
    O: SelectionOverlay,
    S: ScreenLookup,
    C: CaptureProvider,
    R: TextRecognizer,
    X: ExtractionClient,
    N: Notifier,
    P: PlanSink,
{
    overlay: O,
    screen: S,
    capture: C,
    recognizer: R,
    extractor: X,
    notifier: N,
    sink: P,
    config: PipelineConfig,
    shared: Mutex<Shared>,
    state_tx: watch::Sender<PipelineState>,
}

impl<O, S, C, R, X, N, P> CapturePipeline<O, S, C, R, X, N, P>
where
    O: SelectionOverlay,
    S: ScreenLookup,
    C: CaptureProvider,
    R: TextRecognizer,
    X: ExtractionClient,
    N: Notifier,
    P: PlanSink,
{
    /// Create a new pipeline in the idle state
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        overlay: O,
        screen: S,
        capture: C,
        recognizer: R,
        extractor: X,
        notifier: N,
        sink: P,
        config: PipelineConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(PipelineState::Idle);
        Self {
            overlay,
            screen,
            capture,
            recognizer,
            extractor,
            notifier,
            sink,
            config,
            shared: Mutex::new(Shared {
                machine: PipelineMachine::new(),
                run_seq: 0,
                cancel: None,
            }),
            state_tx,
        }
    }

    /// Subscribe to pipeline state changes
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_tx.subscribe()
    }

    /// Get a snapshot of the current state
    pub fn state(&self) -> PipelineState {
        self.state_tx.borrow().clone()
    }

    /// Execute one capture run.
    ///
    /// Only accepted from idle; a start while another run is in flight
    /// returns `Busy` without touching pipeline state.
    pub async fn run(&self, trigger: CaptureTrigger) -> RunOutcome {
        let (seq, token) = {
            let mut shared = self.shared.lock().await;
            if !shared.machine.state().is_idle() {
                log::debug!(
                    "start rejected: pipeline busy ({})",
                    shared.machine.state()
                );
                return RunOutcome::Busy;
            }

            let entered = if trigger.is_interactive() {
                shared.machine.begin_selecting(trigger)
            } else {
                shared.machine.begin_capturing(SelectionRect::ZERO)
            };
            if entered.is_err() {
                return RunOutcome::Busy;
            }

            shared.run_seq += 1;
            let token = CancellationToken::new();
            shared.cancel = Some(token.clone());
            let _ = self.state_tx.send_replace(shared.machine.state().clone());
            (shared.run_seq, token)
        };

        log::debug!("run {} started (trigger={})", seq, trigger);
        let outcome = self.drive(trigger, seq, &token).await;

        let mut shared = self.shared.lock().await;
        if shared.run_seq == seq {
            shared.cancel = None;
        }
        log::debug!("run {} finished: {}", seq, outcome_name(&outcome));
        outcome
    }

    /// Cancel the in-flight run, if any. Idempotent; a no-op from idle.
    ///
    /// Resets the state to idle immediately and signals the run task,
    /// which tears down the outstanding collaborator call (notably the
    /// capture stream) on its next poll.
    pub async fn cancel(&self) {
        let mut shared = self.shared.lock().await;
        {
            let state = shared.machine.state();
            if state.is_idle() || state.is_terminal() {
                // Terminal states are mid-handoff and reset on their own.
                return;
            }
            log::debug!("cancelling run {} in state {}", shared.run_seq, state);
        }

        if let Some(token) = shared.cancel.take() {
            token.cancel();
        }
        shared.run_seq += 1;
        shared.machine.reset();
        let _ = self.state_tx.send_replace(PipelineState::Idle);
    }

    /// Apply a state transition on behalf of run `seq`. Returns false
    /// when the run was superseded by cancellation or the transition is
    /// no longer valid; the run task must then stop.
    async fn advance<F>(&self, seq: u64, transition: F) -> bool
    where
        F: FnOnce(&mut PipelineMachine) -> Result<(), InvalidStateTransition>,
    {
        let mut shared = self.shared.lock().await;
        if shared.run_seq != seq {
            return false;
        }
        match transition(&mut shared.machine) {
            Ok(()) => {
                let _ = self.state_tx.send_replace(shared.machine.state().clone());
                true
            }
            Err(e) => {
                log::debug!("transition rejected: {}", e);
                false
            }
        }
    }

    /// Drive the stages of one run to a terminal outcome
    async fn drive(
        &self,
        trigger: CaptureTrigger,
        seq: u64,
        token: &CancellationToken,
    ) -> RunOutcome {
        // Resolve the capture region
        let region = if trigger.is_interactive() {
            let selected = tokio::select! {
                _ = token.cancelled() => return RunOutcome::Cancelled,
                rect = self.overlay.select_region() => rect,
            };

            let rect = selected
                .map(SelectionRect::normalized)
                .filter(|r| !r.is_empty());

            let Some(rect) = rect else {
                // Silent abort, not an error
                return if self.advance(seq, |m| m.abort_selection()).await {
                    RunOutcome::NoSelection
                } else {
                    RunOutcome::Cancelled
                };
            };

            if !self.advance(seq, |m| m.finalize_selection(rect)).await {
                return RunOutcome::Cancelled;
            }
            Some(rect)
        } else {
            let bounds = tokio::select! {
                _ = token.cancelled() => return RunOutcome::Cancelled,
                bounds = self.trigger_bounds(trigger) => bounds,
            };

            let rect = match bounds {
                Ok(rect) => rect,
                Err(e) => return self.fail(seq, e.into()).await,
            };
            if !self.advance(seq, |m| m.set_capture_rect(rect)).await {
                return RunOutcome::Cancelled;
            }

            // Whole-output capture for screen mode; the rect stays in
            // the observable state either way.
            match trigger {
                CaptureTrigger::MenuScreen => None,
                _ => Some(rect),
            }
        };

        // Capture; the stream is held for this stage only
        let guard = CaptureGuard::new(&self.capture);
        let captured = tokio::select! {
            _ = token.cancelled() => {
                drop(guard);
                return RunOutcome::Cancelled;
            }
            captured = self.capture.capture(region) => captured,
        };
        guard.release();

        let image = match captured {
            Ok(image) => image,
            Err(e) => return self.fail(seq, e.into()).await,
        };
        if !self.advance(seq, |m| m.begin_recognizing(image.info())).await {
            return RunOutcome::Cancelled;
        }

        // Recognize
        let recognized = tokio::select! {
            _ = token.cancelled() => return RunOutcome::Cancelled,
            text = self.recognizer.recognize(&image) => text,
        };
        let text = match recognized {
            Ok(text) => text.trim().to_string(),
            Err(e) => return self.fail(seq, e.into()).await,
        };

        if text.is_empty() {
            // No text in the capture: zero plans, not a failure
            return self.succeed(seq, trigger, image, text, Vec::new()).await;
        }

        if !self.advance(seq, |m| m.begin_extracting(text.clone())).await {
            return RunOutcome::Cancelled;
        }

        // Extract; the token must be present before any network call
        let Some(auth) = self
            .config
            .auth_token
            .as_deref()
            .filter(|t| !t.is_empty())
        else {
            return self.fail(seq, ExtractionError::Unauthenticated.into()).await;
        };

        let extracted = tokio::select! {
            _ = token.cancelled() => return RunOutcome::Cancelled,
            plans = self.extractor.extract(&text, auth, &self.config.timezone) => plans,
        };

        match extracted {
            Ok(plans) => self.succeed(seq, trigger, image, text, plans).await,
            Err(e) => self.fail(seq, e.into()).await,
        }
    }

    /// Resolve trigger-derived bounds for non-interactive modes
    async fn trigger_bounds(
        &self,
        trigger: CaptureTrigger,
    ) -> Result<SelectionRect, crate::domain::pipeline::CaptureError> {
        match trigger {
            CaptureTrigger::MenuWindow => self.screen.focused_window_bounds().await,
            _ => self.screen.display_bounds().await,
        }
    }

    /// Terminal success: publish, hand off to the sink, reset to idle
    async fn succeed(
        &self,
        seq: u64,
        trigger: CaptureTrigger,
        image: ImageData,
        text: String,
        plans: Vec<crate::domain::plan::PlanRecord>,
    ) -> RunOutcome {
        let plan_count = plans.len();
        if !self.advance(seq, |m| m.succeed(plans.clone())).await {
            return RunOutcome::Cancelled;
        }

        self.sink
            .present(CaptureOutcome {
                trigger,
                image,
                text,
                plans,
            })
            .await;

        if self.config.notify_success {
            let message = if plan_count == 0 {
                "No plans found".to_string()
            } else {
                format!("{} plan(s) extracted", plan_count)
            };
            let _ = self
                .notifier
                .notify(APP_NAME, &message, NotificationIcon::Success)
                .await;
        }

        self.advance(seq, |m| {
            m.reset();
            Ok(())
        })
        .await;

        RunOutcome::Completed { plan_count }
    }

    /// Terminal failure: publish, hand the message to the notifier,
    /// reset to idle
    async fn fail(&self, seq: u64, error: PipelineError) -> RunOutcome {
        if !self.advance(seq, |m| m.fail(error.clone())).await {
            return RunOutcome::Cancelled;
        }

        let _ = self
            .notifier
            .notify(APP_NAME, &error.to_string(), NotificationIcon::Error)
            .await;

        self.advance(seq, |m| {
            m.reset();
            Ok(())
        })
        .await;

        RunOutcome::Failed(error)
    }
}

fn outcome_name(outcome: &RunOutcome) -> &'static str {
    match outcome {
        RunOutcome::Completed { .. } => "completed",
        RunOutcome::NoSelection => "no-selection",
        RunOutcome::Cancelled => "cancelled",
        RunOutcome::Failed(_) => "failed",
        RunOutcome::Busy => "busy",
    }
}
