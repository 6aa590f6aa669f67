use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One result fragment delivered by the recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultFragment {
    /// Recognized text
    pub text: String,
    /// Confirmed transcription (true) or provisional estimate (false)
    pub is_final: bool,
}

impl ResultFragment {
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Event emitted by a recognition adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// One delivery of fragments for the current recognition cycle
    Results(Vec<ResultFragment>),
    /// Capture began
    CaptureStarted,
    /// Capture ended, either requested or spontaneous
    CaptureStopped,
    /// Capture failed
    CaptureError(String),
}

/// Continuous speech recognition capability
///
/// Implementations deliver their events on the channel returned when the
/// adapter is created; `start`/`stop` only issue the request.
#[async_trait::async_trait]
pub trait RecognitionAdapter: Send + Sync {
    /// Request that capture begins
    async fn start(&self) -> Result<()>;

    /// Request that capture ends
    async fn stop(&self) -> Result<()>;

    /// Adapter name for logging
    fn name(&self) -> &str;
}
