//! Axum router construction for the store API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS enabled so a dashboard served from elsewhere can call it.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{commands, handlers, operator, ws};

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- HTML dashboard
/// - `GET /health` -- liveness message
/// - `GET /state` -- full store snapshot
/// - `POST /simulate_empty` -- empty a random shelf
/// - `POST /decide` -- restock the highest-priority empty shelf
/// - `GET /api/log` -- recent log entries
/// - `GET /api/metrics` -- dashboard metrics
/// - `GET|POST /api/auto-simulate` -- auto-simulation timer
/// - `GET /ws/updates` -- `WebSocket` update stream
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Dashboard
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Store
        .route("/state", get(handlers::get_state))
        .route("/simulate_empty", post(commands::simulate_empty))
        .route("/decide", post(commands::decide))
        // Extras
        .route("/api/log", get(handlers::get_log))
        .route("/api/metrics", get(handlers::get_metrics))
        .route(
            "/api/auto-simulate",
            get(operator::status).post(operator::configure),
        )
        // WebSocket
        .route("/ws/updates", get(ws::ws_updates))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
