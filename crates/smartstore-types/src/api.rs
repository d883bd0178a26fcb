//! Request and response payloads exchanged between the store API and its
//! clients (browser dashboard, terminal dashboard).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::{RobotPosition, ShelfLabel};

/// Message returned by `POST /decide` when nothing is out of stock.
pub const NO_EMPTY_SHELVES: &str = "No empty shelves";

/// Body of `POST /simulate_empty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SimulateEmptyResponse {
    /// `"Shelf {label} is now empty"`.
    pub message: String,
}

/// Body of `POST /decide`.
///
/// Untagged on the wire: `{"decision": "B"}` or
/// `{"message": "No empty shelves"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "bindings/")]
pub enum DecideResponse {
    /// The robot restocked this shelf.
    Restocked {
        /// Label of the restocked shelf.
        decision: ShelfLabel,
    },
    /// Every shelf was already full.
    NoWork {
        /// Human-readable explanation.
        message: String,
    },
}

impl DecideResponse {
    /// The no-work payload.
    pub fn no_work() -> Self {
        Self::NoWork {
            message: NO_EMPTY_SHELVES.to_owned(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    /// Liveness message.
    pub message: String,
}

/// Body of `GET /api/metrics`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MetricsView {
    /// Total restocking tasks completed.
    pub tasks_completed: u64,
    /// Shelves currently empty.
    pub empty_shelves: usize,
    /// Where the robot is.
    #[ts(as = "String")]
    pub robot_position: RobotPosition,
}

/// Body of `GET /api/log`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogView {
    /// Number of entries returned.
    pub count: usize,
    /// Entries, most recent first.
    pub entries: Vec<String>,
}

/// Auto-simulation settings as reported by `GET /api/auto-simulate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AutoSimulateStatus {
    /// Whether shelves are being emptied on a timer.
    pub enabled: bool,
    /// Seconds between automatic `simulate_empty` calls.
    pub interval_seconds: u64,
}

/// Request body for `POST /api/auto-simulate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct AutoSimulateRequest {
    /// Turn the timer on or off.
    pub enabled: bool,
    /// New interval; unchanged when absent.
    #[serde(default)]
    pub interval_seconds: Option<u64>,
}

/// JSON error body produced by the API for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error.
    pub error: String,
    /// HTTP status code.
    pub status: u16,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn decide_response_wire_shapes() {
        let restocked = DecideResponse::Restocked {
            decision: ShelfLabel::from("B"),
        };
        assert_eq!(
            serde_json::to_value(&restocked).unwrap(),
            serde_json::json!({"decision": "B"})
        );
        assert_eq!(
            serde_json::to_value(DecideResponse::no_work()).unwrap(),
            serde_json::json!({"message": "No empty shelves"})
        );
    }

    #[test]
    fn decide_response_parses_both_shapes() {
        let parsed: DecideResponse = serde_json::from_str(r#"{"decision":"A"}"#).unwrap();
        assert_eq!(
            parsed,
            DecideResponse::Restocked {
                decision: ShelfLabel::from("A")
            }
        );
        let parsed: DecideResponse =
            serde_json::from_str(r#"{"message":"No empty shelves"}"#).unwrap();
        assert_eq!(parsed, DecideResponse::no_work());
    }

    #[test]
    fn auto_simulate_request_interval_optional() {
        let req: AutoSimulateRequest = serde_json::from_str(r#"{"enabled":true}"#).unwrap();
        assert!(req.enabled);
        assert_eq!(req.interval_seconds, None);
    }
}
