use crate::directory::ClientDirectory;
use crate::session::CallOrchestrator;
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The agent's call orchestrator
    pub orchestrator: CallOrchestrator,

    /// Client lookup for call selection
    pub directory: Arc<dyn ClientDirectory>,
}

impl AppState {
    pub fn new(orchestrator: CallOrchestrator, directory: Arc<dyn ClientDirectory>) -> Self {
        Self {
            orchestrator,
            directory,
        }
    }
}
