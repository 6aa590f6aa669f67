use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound for the auto-restart delay
pub const MAX_RESTART_DELAY: Duration = Duration::from_millis(200);

/// Configuration for the call orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Wait before restarting capture after the recognizer stopped on its own.
    /// Never exceeds `MAX_RESTART_DELAY`.
    pub restart_delay: Duration,

    /// Sentiment shown before the first analysis arrives
    pub initial_sentiment: u8,
}

impl SessionConfig {
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay.min(MAX_RESTART_DELAY);
        self
    }

    pub fn with_restart_delay_ms(self, millis: u64) -> Self {
        self.with_restart_delay(Duration::from_millis(millis))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restart_delay: Duration::from_millis(100),
            initial_sentiment: 75,
        }
    }
}
