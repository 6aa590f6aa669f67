use crate::recognition::ResultFragment;
use serde::{Deserialize, Serialize};

/// Command sent to the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecognitionCommand {
    Start,
    Stop,
}

/// Control message published to the recognizer
#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionControlMessage {
    pub stream_id: String,
    pub command: RecognitionCommand,
    pub language: String,
    pub interim_results: bool,
    pub timestamp: String,  // RFC3339 timestamp
}

/// One batch of recognition results
#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionResultMessage {
    pub stream_id: String,
    pub fragments: Vec<ResultFragment>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Capture lifecycle reported by the recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStatus {
    Started,
    Stopped,
    Error,
}

/// Lifecycle message received from the recognizer
#[derive(Debug, Serialize, Deserialize)]
pub struct RecognitionStatusMessage {
    pub stream_id: String,
    pub status: CaptureStatus,
    #[serde(default)]
    pub reason: Option<String>,
}
