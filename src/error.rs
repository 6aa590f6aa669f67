use thiserror::Error;

/// Errors raised inside a call session.
///
/// None of these are fatal: the session degrades (missing suggestion,
/// missing signal update) and the error is surfaced as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// A command was issued in a state that does not allow it
    #[error("{0}")]
    Precondition(String),

    /// The recognition adapter failed to capture speech
    #[error("Erro no reconhecimento: {0}")]
    Capture(String),

    /// A single analysis request failed or timed out
    #[error("Erro ao analisar conversa: {0}")]
    Analysis(String),
}

impl CallError {
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Precondition(_) => "precondition",
            CallError::Capture(_) => "capture",
            CallError::Analysis(_) => "analysis",
        }
    }
}
