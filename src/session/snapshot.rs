use super::history::ConversationEntry;
use super::signals::DerivedSignals;
use crate::directory::ClientRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallPhase {
    Idle,
    Active,
    /// Behaves as `Idle` for the next `start_call`
    Ended,
}

impl CallPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallPhase::Idle => "idle",
            CallPhase::Active => "active",
            CallPhase::Ended => "ended",
        }
    }
}

/// One call with a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSession {
    pub session_id: String,
    pub client: ClientRef,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

impl CallSession {
    pub fn new(client: ClientRef) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            client,
            started_at: Utc::now(),
            ended_at: None,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        let end = self.ended_at.unwrap_or_else(Utc::now);
        end.signed_duration_since(self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Read-only view of the orchestrator for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallSnapshot {
    pub phase: CallPhase,
    pub session: Option<CallSession>,
    pub selected_client: Option<ClientRef>,
    /// Whether the recognizer last reported capture as running
    pub capturing: bool,
    pub transcript: String,
    pub history: Vec<ConversationEntry>,
    pub signals: DerivedSignals,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serialization() {
        assert_eq!(serde_json::to_string(&CallPhase::Active).unwrap(), "\"active\"");
        let parsed: CallPhase = serde_json::from_str("\"ended\"").unwrap();
        assert_eq!(parsed, CallPhase::Ended);
        assert_eq!(CallPhase::Idle.as_str(), "idle");
    }

    #[test]
    fn test_session_ids_are_unique() {
        let client = ClientRef::new("C1", "Cliente 1");
        let a = CallSession::new(client.clone());
        let b = CallSession::new(client);
        assert_ne!(a.session_id, b.session_id);
        assert!(a.ended_at.is_none());
    }
}
