//! Enumeration types for the `SmartStore` simulation.
//!
//! Both enums serialize lowercase (`"full"`, `"high"`, ...) to match the
//! JSON layout the dashboard reads.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Shelf status
// ---------------------------------------------------------------------------

/// Stock status of a single shelf.
///
/// A shelf only changes status through the two store commands:
/// `simulate_empty` moves it to [`Empty`](Self::Empty) and a restock
/// decision moves it back to [`Full`](Self::Full).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ShelfStatus {
    /// The shelf is stocked.
    #[default]
    Full,
    /// The shelf is out of stock and waiting for the robot.
    Empty,
}

impl ShelfStatus {
    /// Returns `true` for [`ShelfStatus::Empty`].
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

// ---------------------------------------------------------------------------
// Traffic
// ---------------------------------------------------------------------------

/// Descriptive footfall tag attached to a shelf.
///
/// Static for the lifetime of the store. The restock rule does not read it;
/// it is carried through to the dashboard only.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Traffic {
    /// Rarely visited aisle.
    Low,
    /// Average footfall.
    #[default]
    Medium,
    /// Busy aisle.
    High,
}

impl core::fmt::Display for Traffic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(name)
    }
}
