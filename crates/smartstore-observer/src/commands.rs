//! Handlers for the two store commands.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/simulate_empty` | Empty a random shelf |
//! | `POST` | `/decide` | Restock the highest-priority empty shelf |
//!
//! Neither takes a request body.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use smartstore_core::Decision;
use smartstore_types::{DecideResponse, SimulateEmptyResponse};

use crate::error::ObserverError;
use crate::state::AppState;

/// Mark a random shelf empty.
///
/// Responds with `{"message": "Shelf X is now empty"}`.
pub async fn simulate_empty(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SimulateEmptyResponse>, ObserverError> {
    let emptied = state.simulate_empty().await?;
    Ok(Json(SimulateEmptyResponse {
        message: emptied.message(),
    }))
}

/// Ask the robot to restock.
///
/// Responds with `{"decision": "X"}`, or with
/// `{"message": "No empty shelves"}` when everything is stocked. Both are
/// `200 OK`.
pub async fn decide(State(state): State<Arc<AppState>>) -> Json<DecideResponse> {
    let response = match state.decide().await {
        Decision::Restocked { shelf, .. } => DecideResponse::Restocked { decision: shelf },
        Decision::NoWork => DecideResponse::no_work(),
    };
    Json(response)
}
