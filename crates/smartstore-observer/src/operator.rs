//! Operator endpoints for the auto-simulation timer.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/auto-simulate` | Current switch and interval |
//! | `POST` | `/api/auto-simulate` | Switch the timer and optionally change the interval |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use smartstore_core::autosim::{MAX_INTERVAL_SECONDS, MIN_INTERVAL_SECONDS};
use smartstore_types::{AutoSimulateRequest, AutoSimulateStatus};
use tracing::info;

use crate::error::ObserverError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/auto-simulate
// ---------------------------------------------------------------------------

/// Report whether the timer is on and how often it fires.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<AutoSimulateStatus> {
    Json(state.auto_simulate.status())
}

// ---------------------------------------------------------------------------
// POST /api/auto-simulate
// ---------------------------------------------------------------------------

/// Switch the timer on or off.
///
/// The interval is validated before anything changes, so a rejected
/// request leaves both fields untouched. A body that does not parse is
/// answered with the same 400 JSON error shape.
pub async fn configure(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AutoSimulateRequest>, JsonRejection>,
) -> Result<Json<AutoSimulateStatus>, ObserverError> {
    let Json(body) = payload?;
    let control = &state.auto_simulate;

    if let Some(seconds) = body.interval_seconds {
        let prev = control.set_interval_seconds(seconds).ok_or_else(|| {
            ObserverError::InvalidRequest(format!(
                "interval_seconds must be between {MIN_INTERVAL_SECONDS} and {MAX_INTERVAL_SECONDS}"
            ))
        })?;
        if prev != seconds {
            info!(from = prev, to = seconds, "auto-simulate interval changed");
        }
    }

    if control.is_enabled() != body.enabled {
        info!(enabled = body.enabled, "auto-simulate switched");
    }
    control.set_enabled(body.enabled);

    Ok(Json(control.status()))
}
