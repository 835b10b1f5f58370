//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};

use crate::handlers::{
    charts::api_charts,
    dashboard::dashboard,
    health::api_health,
    options::{api_conditions, api_drugs},
    review::{api_review, api_review_stream},
    session::{api_session, api_session_update},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",                  get(dashboard))

        // API endpoints
        .route("/api/conditions",    get(api_conditions))
        .route("/api/drugs",         get(api_drugs))
        .route("/api/charts",        get(api_charts))
        .route("/api/session",       get(api_session).post(api_session_update))
        .route("/api/review",        post(api_review))
        .route("/api/health",        get(api_health))

        // SSE streaming
        .route("/api/review/stream", get(api_review_stream))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
