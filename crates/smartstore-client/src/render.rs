//! Plain-text rendering of the store for the terminal dashboard.
//!
//! Everything here is pure: it takes wire types and returns strings, so
//! the layout is tested without a backend.

use std::fmt::Write as _;

use smartstore_types::{DecideResponse, RECENT_LOG_LEN, StoreSnapshot};

/// Render the whole dashboard: shelf grid, metrics and recent log.
pub fn render_dashboard(snapshot: &StoreSnapshot) -> String {
    let mut out = String::from("SmartStore\n==========\n\nShelf Status\n");

    for (label, shelf) in &snapshot.shelves {
        let robot = if snapshot.robot_position.is_at(label.as_str()) {
            " [robot]"
        } else {
            ""
        };
        let status = if shelf.is_empty() { "Empty" } else { "Full" };
        let _ = writeln!(
            out,
            "  Shelf {label}{robot}\n    Status: {status}\n    Traffic: {}\n    Empty Minutes: {}",
            shelf.traffic, shelf.empty_minutes
        );
    }

    let _ = write!(
        out,
        "\nMetrics\n  Total Restocking Tasks: {}\n  Empty Shelves: {}\n  Robot Position: {}\n",
        snapshot.tasks_completed,
        snapshot.empty_shelves(),
        snapshot.robot_position
    );

    out.push_str("\nAction Log\n");
    let recent = snapshot.recent_log(RECENT_LOG_LEN);
    if recent.is_empty() {
        out.push_str("  (no actions yet)\n");
    }
    for entry in recent {
        let _ = writeln!(out, "  - {entry}");
    }

    out
}

/// One-line result of `POST /decide`.
pub fn render_decision(response: &DecideResponse) -> String {
    match response {
        DecideResponse::Restocked { decision } => {
            format!("Robot is restocking Shelf {decision}")
        }
        DecideResponse::NoWork { message } => message.clone(),
    }
}

/// Notice shown when the backend cannot be reached.
pub fn render_unreachable(base_url: &str) -> String {
    format!("Backend not running yet at {base_url}. Please wait a few seconds and retry.")
}
