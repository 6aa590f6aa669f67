use super::state::AppState;
use crate::directory::ClientRef;
use crate::error::CallError;
use crate::session::{CallPhase, CallSnapshot, ConversationEntry};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectClientRequest {
    /// Client to select; `null` clears the selection
    pub client_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SelectClientResponse {
    pub client: Option<ClientRef>,
}

#[derive(Debug, Serialize)]
pub struct StartCallResponse {
    pub session_id: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct EndCallResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /call/client
/// Select the client for the next call
pub async fn select_client(
    State(state): State<AppState>,
    Json(req): Json<SelectClientRequest>,
) -> impl IntoResponse {
    let Some(client_id) = req.client_id else {
        state.orchestrator.select_client(None).await;
        return (StatusCode::OK, Json(SelectClientResponse { client: None })).into_response();
    };

    match state.directory.get_client(&client_id).await {
        Ok(Some(record)) => {
            let client = ClientRef::from(&record);
            state.orchestrator.select_client(Some(client.clone())).await;
            (
                StatusCode::OK,
                Json(SelectClientResponse {
                    client: Some(client),
                }),
            )
                .into_response()
        }
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("Cliente {} não encontrado", client_id),
        ),
        Err(e) => {
            error!("Failed to look up client {}: {:#}", client_id, e);
            error_response(
                StatusCode::BAD_GATEWAY,
                format!("Failed to look up client: {}", e),
            )
        }
    }
}

/// POST /call/start
/// Start a call with the selected client
pub async fn start_call(State(state): State<AppState>) -> impl IntoResponse {
    match state.orchestrator.start_call().await {
        Ok(session) => {
            info!("Call started via API: {}", session.session_id);
            (
                StatusCode::OK,
                Json(StartCallResponse {
                    session_id: session.session_id.clone(),
                    status: CallPhase::Active.as_str().to_string(),
                    message: format!("Call started with {}", session.client.display_name),
                }),
            )
                .into_response()
        }
        Err(e @ CallError::Precondition(_)) => error_response(StatusCode::CONFLICT, e.to_string()),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    }
}

/// POST /call/end
/// End the active call; a no-op when idle
pub async fn end_call(State(state): State<AppState>) -> impl IntoResponse {
    let ended = state.orchestrator.end_call().await;
    let phase = state.orchestrator.phase().await;

    let message = if ended {
        "Call ended"
    } else {
        "No active call"
    };

    (
        StatusCode::OK,
        Json(EndCallResponse {
            status: phase.as_str().to_string(),
            message: message.to_string(),
        }),
    )
}

/// GET /call/state
/// Snapshot of the call for the presentation layer
pub async fn get_call_state(State(state): State<AppState>) -> Json<CallSnapshot> {
    Json(state.orchestrator.snapshot().await)
}

/// GET /call/history
/// Conversation history of the current (or last) call
pub async fn get_history(State(state): State<AppState>) -> Json<Vec<ConversationEntry>> {
    Json(state.orchestrator.history().await)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
