use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Call control
        .route("/call/client", post(handlers::select_client))
        .route("/call/start", post(handlers::start_call))
        .route("/call/end", post(handlers::end_call))
        // Call queries
        .route("/call/state", get(handlers::get_call_state))
        .route("/call/history", get(handlers::get_history))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
