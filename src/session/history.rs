use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a conversation entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Finalized speech of the call
    #[serde(rename = "client_speech")]
    Utterance,
    /// Analysis returned for an utterance
    #[serde(rename = "ai_suggestion")]
    Suggestion,
}

/// One entry of the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationEntry {
    pub id: u64,
    pub kind: EntryKind,
    pub text: String,
    /// Only present on suggestion entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation history of the current call
///
/// Ids keep increasing across `clear`, so an id never refers to two entries.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
    last_id: u64,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_utterance(&mut self, text: impl Into<String>) -> u64 {
        self.append(EntryKind::Utterance, text.into(), None)
    }

    pub fn append_suggestion(&mut self, text: impl Into<String>, suggestions: Vec<String>) -> u64 {
        self.append(EntryKind::Suggestion, text.into(), Some(suggestions))
    }

    fn append(&mut self, kind: EntryKind, text: String, suggestions: Option<Vec<String>>) -> u64 {
        self.last_id += 1;
        self.entries.push(ConversationEntry {
            id: self.last_id,
            kind,
            text,
            suggestions,
            timestamp: Utc::now(),
        });
        self.last_id
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
