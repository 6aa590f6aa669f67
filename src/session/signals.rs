use crate::analysis::AnalysisResponse;
use serde::{Deserialize, Serialize};

/// Signals derived from the latest analysis, read by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSignals {
    pub sentiment_score: u8,
    pub flow_status: String,
    pub suggestions: Vec<String>,
}

/// Single writer of `DerivedSignals`
///
/// An analysis response only overwrites the signals when its sequence tag is
/// higher than the last one applied.
#[derive(Debug, Clone)]
pub struct SignalBoard {
    signals: DerivedSignals,
    last_applied: Option<u64>,
}

impl SignalBoard {
    pub fn new(initial_sentiment: u8, flow_status: impl Into<String>) -> Self {
        Self {
            signals: DerivedSignals {
                sentiment_score: initial_sentiment.min(100),
                flow_status: flow_status.into(),
                suggestions: Vec::new(),
            },
            last_applied: None,
        }
    }

    /// Apply a response tagged `seq`; returns false if a newer one was already applied
    pub fn apply(&mut self, seq: u64, response: &AnalysisResponse) -> bool {
        if self.last_applied.is_some_and(|last| seq <= last) {
            return false;
        }

        self.signals = DerivedSignals {
            sentiment_score: response.sentiment(),
            flow_status: response.flow_status.clone(),
            suggestions: response.suggestions.clone(),
        };
        self.last_applied = Some(seq);
        true
    }

    /// Lifecycle label set by the call state machine
    pub fn set_flow_status(&mut self, label: impl Into<String>) {
        self.signals.flow_status = label.into();
    }

    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    pub fn current(&self) -> &DerivedSignals {
        &self.signals
    }
}
