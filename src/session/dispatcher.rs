use super::history::ConversationLog;
use super::signals::SignalBoard;
use super::snapshot::CallSession;
use crate::analysis::{AnalysisRequest, AnalysisResponse};
use crate::error::CallError;
use tracing::{debug, warn};

/// An analysis request in flight, tagged with its dispatch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTicket {
    pub seq: u64,
    pub request: AnalysisRequest,
}

/// What happened to an analysis response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Recorded in history and applied to the signals
    Applied,
    /// Recorded in history; a later utterance's response already owns the signals
    Stale,
    /// The request failed; only the utterance stays in history
    Failed(CallError),
    /// The session it belongs to is no longer active
    Dropped,
}

/// Bookkeeping for utterances sent to the analysis service
///
/// Sequence tags keep increasing for the lifetime of the dispatcher, so a tag
/// from an earlier call can never outrank one from the current call.
#[derive(Debug, Default)]
pub struct AnalysisDispatcher {
    last_seq: u64,
}

impl AnalysisDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the utterance and tag a request for it.
    ///
    /// `context` is the active call, if any. Returns `None` without recording
    /// anything when there is no context or the utterance is blank.
    pub fn begin(
        &mut self,
        context: Option<&CallSession>,
        utterance: &str,
        history: &mut ConversationLog,
    ) -> Option<DispatchTicket> {
        let Some(session) = context else {
            warn!("No client or call session, utterance not analyzed");
            return None;
        };

        let text = utterance.trim();
        if text.is_empty() {
            debug!("Ignoring blank utterance");
            return None;
        }

        history.append_utterance(text);
        self.last_seq += 1;

        Some(DispatchTicket {
            seq: self.last_seq,
            request: AnalysisRequest {
                session_id: session.session_id.clone(),
                client_ref: session.client.id.clone(),
                utterance_text: text.to_string(),
            },
        })
    }

    /// Apply the result of a request in response-arrival order
    pub fn complete(
        ticket: &DispatchTicket,
        result: Result<AnalysisResponse, CallError>,
        active_session: Option<&str>,
        history: &mut ConversationLog,
        signals: &mut SignalBoard,
    ) -> DispatchOutcome {
        if active_session != Some(ticket.request.session_id.as_str()) {
            return DispatchOutcome::Dropped;
        }

        match result {
            Err(e) => DispatchOutcome::Failed(e),
            Ok(response) => {
                history.append_suggestion(
                    response.analysis_text.clone(),
                    response.suggestions.clone(),
                );
                if signals.apply(ticket.seq, &response) {
                    DispatchOutcome::Applied
                } else {
                    DispatchOutcome::Stale
                }
            }
        }
    }

    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }
}
