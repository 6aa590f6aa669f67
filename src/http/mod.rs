//! HTTP API server for the agent's call screen
//!
//! This module provides a REST API for driving calls:
//! - POST /call/client - Select the client for the next call
//! - POST /call/start - Start a call
//! - POST /call/end - End the active call
//! - GET /call/state - Transcript, history, signals and call phase
//! - GET /call/history - Conversation history
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
