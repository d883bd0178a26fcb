//! Core entity structs: shelves, store snapshots and update events.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ShelfStatus, Traffic};
use crate::ids::{RobotPosition, ShelfLabel};

/// Number of log entries the dashboard shows.
pub const RECENT_LOG_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Shelf
// ---------------------------------------------------------------------------

/// A named storage slot with a stock status and traffic tag.
///
/// `empty_minutes` is only meaningful while the shelf is empty and is
/// always `0` while it is full.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Shelf {
    /// Current stock status.
    pub status: ShelfStatus,
    /// Simulated minutes the shelf has been out of stock.
    pub empty_minutes: u32,
    /// Static footfall tag.
    pub traffic: Traffic,
}

impl Shelf {
    /// A freshly stocked shelf.
    pub const fn full(traffic: Traffic) -> Self {
        Self {
            status: ShelfStatus::Full,
            empty_minutes: 0,
            traffic,
        }
    }

    /// Returns `true` while the shelf waits for a restock.
    pub const fn is_empty(&self) -> bool {
        self.status.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Store snapshot
// ---------------------------------------------------------------------------

/// Read-only copy of the whole store.
///
/// This is the `getState` payload. Shelves are keyed in label order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoreSnapshot {
    /// Every configured shelf, keyed by label.
    pub shelves: BTreeMap<ShelfLabel, Shelf>,
    /// `"Dock"` or the label of the last restocked shelf.
    #[ts(as = "String")]
    pub robot_position: RobotPosition,
    /// Number of successful restocks.
    pub tasks_completed: u64,
    /// Full event log, oldest first.
    pub log: Vec<String>,
}

impl StoreSnapshot {
    /// Count shelves currently out of stock.
    pub fn empty_shelves(&self) -> usize {
        self.shelves.values().filter(|s| s.is_empty()).count()
    }

    /// The newest `limit` log entries, most recent first.
    pub fn recent_log(&self, limit: usize) -> Vec<&str> {
        recent_entries(&self.log, limit)
    }
}

/// Wrapper matching the `GET /state` body: `{"store": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoreEnvelope {
    /// The wrapped snapshot.
    pub store: StoreSnapshot,
}

/// Return the newest `limit` entries of `log`, most recent first.
pub fn recent_entries(log: &[String], limit: usize) -> Vec<&str> {
    log.iter().rev().take(limit).map(String::as_str).collect()
}

// ---------------------------------------------------------------------------
// Update stream
// ---------------------------------------------------------------------------

/// What kind of mutation produced a [`StoreUpdate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum UpdateKind {
    /// A shelf was marked empty.
    ShelfEmptied,
    /// The robot restocked a shelf.
    ShelfRestocked,
}

/// Pushed to stream subscribers after every state mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct StoreUpdate {
    /// Which command ran.
    pub kind: UpdateKind,
    /// The shelf the command touched.
    pub shelf: ShelfLabel,
    /// The log line the command appended.
    pub log_line: String,
    /// State right after the command.
    pub store: StoreSnapshot,
    /// When the update was produced.
    pub at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn three_shelves() -> StoreSnapshot {
        let mut shelves = BTreeMap::new();
        shelves.insert(ShelfLabel::from("A"), Shelf::full(Traffic::High));
        shelves.insert(ShelfLabel::from("B"), Shelf::full(Traffic::Low));
        shelves.insert(ShelfLabel::from("C"), Shelf::full(Traffic::Medium));
        StoreSnapshot {
            shelves,
            robot_position: RobotPosition::Dock,
            tasks_completed: 0,
            log: Vec::new(),
        }
    }

    #[test]
    fn envelope_matches_dashboard_layout() {
        let envelope = StoreEnvelope {
            store: three_shelves(),
        };
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["store"]["robot_position"], "Dock");
        assert_eq!(json["store"]["tasks_completed"], 0);
        assert_eq!(json["store"]["shelves"]["A"]["status"], "full");
        assert_eq!(json["store"]["shelves"]["A"]["traffic"], "high");
        assert_eq!(json["store"]["shelves"]["B"]["empty_minutes"], 0);
        assert!(json["store"]["log"].as_array().unwrap().is_empty());
    }

    #[test]
    fn recent_log_is_newest_first_and_capped() {
        let mut snap = three_shelves();
        snap.log = (1..=12).map(|i| format!("entry {i}")).collect();

        let recent = snap.recent_log(RECENT_LOG_LEN);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first(), Some(&"entry 12"));
        assert_eq!(recent.last(), Some(&"entry 3"));
    }

    #[test]
    fn recent_log_shorter_than_limit() {
        let mut snap = three_shelves();
        snap.log = vec![String::from("only")];
        assert_eq!(snap.recent_log(RECENT_LOG_LEN), ["only"]);
    }

    #[test]
    fn empty_shelf_count() {
        let mut snap = three_shelves();
        assert_eq!(snap.empty_shelves(), 0);
        if let Some(shelf) = snap.shelves.get_mut("B") {
            shelf.status = ShelfStatus::Empty;
            shelf.empty_minutes = 4;
        }
        assert_eq!(snap.empty_shelves(), 1);
    }

    #[test]
    fn update_kind_is_snake_case() {
        let json = serde_json::to_string(&UpdateKind::ShelfRestocked).unwrap();
        assert_eq!(json, "\"shelf_restocked\"");
    }
}
