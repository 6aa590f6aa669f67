use super::config::SessionConfig;
use super::dispatcher::{AnalysisDispatcher, DispatchOutcome, DispatchTicket};
use super::history::{ConversationEntry, ConversationLog};
use super::labels;
use super::notice::{Notice, NoticeLevel};
use super::signals::SignalBoard;
use super::snapshot::{CallPhase, CallSession, CallSnapshot};
use super::transcript::TranscriptAssembler;
use crate::analysis::{AnalysisResponse, AnalysisService};
use crate::directory::ClientRef;
use crate::error::CallError;
use crate::recognition::{RecognitionAdapter, RecognitionEvent, ResultFragment};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex, MutexGuard};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Everything the orchestrator mutates. Guarded by one mutex so recognition
/// events, commands and analysis responses apply one at a time.
struct CallState {
    phase: CallPhase,
    session: Option<CallSession>,
    selected_client: Option<ClientRef>,
    capturing: bool,
    transcript: TranscriptAssembler,
    history: ConversationLog,
    signals: SignalBoard,
    dispatcher: AnalysisDispatcher,
    /// Capture was asked to start and not asked to stop since
    capture_requested: bool,
    /// Stops we requested whose `CaptureStopped` has not arrived yet
    solicited_stops: u32,
    /// Scheduled auto-restart, if any
    pending_restart: Option<JoinHandle<()>>,
}

impl CallState {
    fn new(config: &SessionConfig) -> Self {
        Self {
            phase: CallPhase::Idle,
            session: None,
            selected_client: None,
            capturing: false,
            transcript: TranscriptAssembler::new(),
            history: ConversationLog::new(),
            signals: SignalBoard::new(config.initial_sentiment, labels::FLOW_NO_CLIENT),
            dispatcher: AnalysisDispatcher::new(),
            capture_requested: false,
            solicited_stops: 0,
            pending_restart: None,
        }
    }

    /// Session id of the active call
    fn active_session_id(&self) -> Option<&str> {
        match self.phase {
            CallPhase::Active => self.session.as_ref().map(|s| s.session_id.as_str()),
            _ => None,
        }
    }

    fn cancel_restart(&mut self) {
        if let Some(handle) = self.pending_restart.take() {
            handle.abort();
        }
    }
}

struct Inner {
    config: SessionConfig,
    recognizer: Arc<dyn RecognitionAdapter>,
    analysis: Arc<dyn AnalysisService>,
    state: Mutex<CallState>,
    /// Serializes start/stop requests to the recognizer. Taken before `state`,
    /// never while holding it.
    control: Mutex<()>,
    notices: broadcast::Sender<Notice>,
}

/// Orchestrates one agent's calls: lifecycle, speech capture, transcript and
/// analysis of each finalized utterance
#[derive(Clone)]
pub struct CallOrchestrator {
    inner: Arc<Inner>,
}

impl CallOrchestrator {
    pub fn new(
        config: SessionConfig,
        recognizer: Arc<dyn RecognitionAdapter>,
        analysis: Arc<dyn AnalysisService>,
    ) -> Self {
        info!("Creating call orchestrator (recognizer: {})", recognizer.name());

        let (notices, _) = broadcast::channel(64);
        let state = Mutex::new(CallState::new(&config));

        Self {
            inner: Arc::new(Inner {
                config,
                recognizer,
                analysis,
                state,
                control: Mutex::new(()),
                notices,
            }),
        }
    }

    /// Spawn a task feeding recognition events to the orchestrator
    pub fn listen(&self, mut events: mpsc::Receiver<RecognitionEvent>) -> JoinHandle<()> {
        let orchestrator = self.clone();
        tokio::spawn(async move {
            info!("Recognition event loop started");

            while let Some(event) = events.recv().await {
                orchestrator.handle_event(event).await;
            }

            info!("Recognition event loop stopped");
        })
    }

    /// Receive notices surfaced to the agent
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    /// Select the counterparty for the next call
    pub async fn select_client(&self, client: Option<ClientRef>) {
        let mut state = self.inner.state.lock().await;

        if state.phase != CallPhase::Active {
            let label = if client.is_some() {
                labels::FLOW_CLIENT_SELECTED
            } else {
                labels::FLOW_NO_CLIENT
            };
            state.signals.set_flow_status(label);
        }

        match &client {
            Some(c) => info!("Client selected: {} ({})", c.display_name, c.id),
            None => info!("Client selection cleared"),
        }
        state.selected_client = client;
    }

    /// Start a call with the selected client
    pub async fn start_call(&self) -> Result<CallSession, CallError> {
        let _control = self.inner.control.lock().await;

        let session = {
            let mut state = self.inner.state.lock().await;

            let Some(client) = state.selected_client.clone() else {
                return Err(self.inner.reject(CallError::Precondition(
                    labels::ERR_NO_CLIENT.to_string(),
                )));
            };
            if state.phase == CallPhase::Active {
                return Err(self.inner.reject(CallError::Precondition(
                    labels::ERR_CALL_ACTIVE.to_string(),
                )));
            }

            let session = CallSession::new(client);
            info!(
                "Starting call {} with {}",
                session.session_id, session.client.display_name
            );

            state.cancel_restart();
            state.phase = CallPhase::Active;
            state.session = Some(session.clone());
            state.transcript.reset();
            state.history.clear();
            state
                .signals
                .set_flow_status(labels::FLOW_AWAITING_SPEECH);
            state.capture_requested = true;
            session
        };

        self.inner
            .notify(NoticeLevel::Success, labels::NOTICE_CALL_STARTED);
        self.inner.start_capture(&session.session_id).await;

        Ok(session)
    }

    /// End the active call; returns false when no call was active
    pub async fn end_call(&self) -> bool {
        let _control = self.inner.control.lock().await;

        let stop_counted = {
            let mut state = self.inner.state.lock().await;

            if state.phase != CallPhase::Active {
                debug!("End call requested with no active call");
                return false;
            }

            state.phase = CallPhase::Ended;
            state.cancel_restart();
            if let Some(session) = state.session.as_mut() {
                session.ended_at = Some(Utc::now());
                info!(
                    "Ending call {} after {:.1}s",
                    session.session_id,
                    session.duration_secs()
                );
            }
            state.transcript.reset();
            state.signals.set_flow_status(labels::FLOW_CALL_ENDED);
            state.capturing = false;

            // The recognizer confirms this stop with a `CaptureStopped`,
            // even when capture never reported itself started
            let counted = state.capture_requested;
            if counted {
                state.solicited_stops += 1;
                state.capture_requested = false;
            }
            counted
        };

        if let Err(e) = self.inner.recognizer.stop().await {
            error!("Failed to stop recognizer: {:#}", e);
            if stop_counted {
                let mut state = self.inner.state.lock().await;
                state.solicited_stops = state.solicited_stops.saturating_sub(1);
            }
            self.inner.reject(CallError::Capture(e.to_string()));
        }

        self.inner.notify(NoticeLevel::Info, labels::NOTICE_CALL_ENDED);
        true
    }

    /// Apply one event from the recognition adapter
    pub async fn handle_event(&self, event: RecognitionEvent) {
        let mut state = self.inner.state.lock().await;

        match event {
            RecognitionEvent::Results(fragments) => {
                Inner::ingest(&self.inner, &mut state, &fragments);
            }
            RecognitionEvent::CaptureStarted => {
                debug!("Capture started");
                state.capturing = true;
            }
            RecognitionEvent::CaptureStopped => {
                state.capturing = false;

                if state.solicited_stops > 0 {
                    state.solicited_stops -= 1;
                    debug!("Capture stopped as requested");
                    return;
                }
                if state.phase != CallPhase::Active {
                    debug!("Capture stopped outside of a call");
                    return;
                }
                state.capture_requested = false;
                if state
                    .pending_restart
                    .as_ref()
                    .is_some_and(|handle| !handle.is_finished())
                {
                    debug!("Capture restart already scheduled");
                    return;
                }

                Inner::schedule_restart(&self.inner, &mut state);
            }
            RecognitionEvent::CaptureError(reason) => {
                warn!("Capture error: {}", reason);
                self.inner.reject(CallError::Capture(reason));
            }
        }
    }

    pub async fn snapshot(&self) -> CallSnapshot {
        let state = self.inner.state.lock().await;

        CallSnapshot {
            phase: state.phase,
            session: state.session.clone(),
            selected_client: state.selected_client.clone(),
            capturing: state.capturing,
            transcript: state.transcript.display_text(),
            history: state.history.entries().to_vec(),
            signals: state.signals.current().clone(),
        }
    }

    pub async fn phase(&self) -> CallPhase {
        self.inner.state.lock().await.phase
    }

    pub async fn history(&self) -> Vec<ConversationEntry> {
        self.inner.state.lock().await.history.entries().to_vec()
    }
}

impl Inner {
    fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        // No subscribers is fine
        let _ = self.notices.send(Notice::new(level, message));
    }

    /// Surface an error as a notice and hand it back
    fn reject(&self, err: CallError) -> CallError {
        warn!("{} error: {}", err.kind(), err);
        self.notify(NoticeLevel::Error, err.to_string());
        err
    }

    /// Ask the recognizer to capture for `session_id`. A failure does not
    /// end the call. Called with `control` held and `state` released.
    async fn start_capture(&self, session_id: &str) {
        if let Err(e) = self.recognizer.start().await {
            error!("Failed to start recognizer: {:#}", e);

            let mut state = self.state.lock().await;
            if state.active_session_id() == Some(session_id) {
                state.capture_requested = false;
            }
            drop(state);

            self.reject(CallError::Capture(e.to_string()));
        }
    }

    fn ingest(this: &Arc<Self>, state: &mut MutexGuard<'_, CallState>, fragments: &[ResultFragment]) {
        if state.phase != CallPhase::Active {
            debug!("Dropping {} fragments outside of a call", fragments.len());
            return;
        }

        let Some(utterance) = state.transcript.ingest(fragments) else {
            return;
        };
        info!("Finalized utterance: {}", utterance);

        let context = match &state.selected_client {
            Some(_) => state.session.clone(),
            None => None,
        };
        let CallState {
            dispatcher,
            history,
            ..
        } = &mut **state;
        let Some(ticket) = dispatcher.begin(context.as_ref(), &utterance, history) else {
            return;
        };

        let inner = Arc::clone(this);
        tokio::spawn(async move {
            let result = inner.analysis.analyze(&ticket.request).await;
            inner.complete(ticket, result).await;
        });
    }

    async fn complete(&self, ticket: DispatchTicket, result: Result<AnalysisResponse, CallError>) {
        let mut state = self.state.lock().await;

        let active = state.active_session_id().map(str::to_string);
        let CallState {
            history, signals, ..
        } = &mut *state;
        let outcome =
            AnalysisDispatcher::complete(&ticket, result, active.as_deref(), history, signals);

        match outcome {
            DispatchOutcome::Applied => {
                info!("Analysis #{} applied", ticket.seq);
            }
            DispatchOutcome::Stale => {
                debug!(
                    "Analysis #{} recorded, signals already hold a newer result",
                    ticket.seq
                );
            }
            DispatchOutcome::Failed(err) => {
                self.reject(err);
            }
            DispatchOutcome::Dropped => {
                debug!(
                    "Dropping analysis #{} for inactive session {}",
                    ticket.seq, ticket.request.session_id
                );
            }
        }
    }

    fn schedule_restart(this: &Arc<Self>, state: &mut MutexGuard<'_, CallState>) {
        let Some(session_id) = state.active_session_id().map(str::to_string) else {
            return;
        };
        let delay = this.config.restart_delay;
        info!("Capture stopped unexpectedly, restarting in {:?}", delay);

        let inner = Arc::clone(this);
        state.pending_restart = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let _control = inner.control.lock().await;
            {
                let mut state = inner.state.lock().await;
                if state.active_session_id() != Some(session_id.as_str()) {
                    return;
                }
                state.capture_requested = true;
            }
            debug!("Restarting capture for call {}", session_id);
            inner.start_capture(&session_id).await;
        }));
    }
}
