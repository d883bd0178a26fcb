//! Identifier types: shelf labels and the robot's position.
//!
//! Shelves are keyed by a short human label (`"A"`, `"B"`, ...) rather
//! than a generated ID, so [`ShelfLabel`] is a thin ordered wrapper around
//! [`String`]. Ordering is lexicographic and is what the restock rule uses
//! to break ties.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The sentinel robot position used before any restock has happened.
pub const DOCK: &str = "Dock";

/// Label identifying a shelf.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export, export_to = "bindings/")]
pub struct ShelfLabel(String);

impl ShelfLabel {
    /// Create a label from anything string-like.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the label and return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ShelfLabel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShelfLabel {
    fn from(label: &str) -> Self {
        Self(label.to_owned())
    }
}

impl From<String> for ShelfLabel {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for ShelfLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Where the single restocking robot currently is.
///
/// Serialized as a plain string: `"Dock"` or the label of the shelf the
/// robot last restocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RobotPosition {
    /// Idle at the dock; no restock has happened yet.
    #[default]
    Dock,
    /// Parked at the most recently restocked shelf.
    Shelf(ShelfLabel),
}

impl RobotPosition {
    /// Returns `true` when the robot is parked at `label`.
    pub fn is_at(&self, label: &str) -> bool {
        match self {
            Self::Dock => false,
            Self::Shelf(at) => at.as_str() == label,
        }
    }
}

impl core::fmt::Display for RobotPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dock => f.write_str(DOCK),
            Self::Shelf(label) => write!(f, "{label}"),
        }
    }
}

impl From<String> for RobotPosition {
    fn from(raw: String) -> Self {
        if raw == DOCK {
            Self::Dock
        } else {
            Self::Shelf(ShelfLabel(raw))
        }
    }
}

impl From<RobotPosition> for String {
    fn from(position: RobotPosition) -> Self {
        match position {
            RobotPosition::Dock => DOCK.to_owned(),
            RobotPosition::Shelf(label) => label.into_inner(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn labels_order_lexicographically() {
        let mut labels = vec![ShelfLabel::from("C"), ShelfLabel::from("A"), ShelfLabel::from("B")];
        labels.sort();
        let names: Vec<&str> = labels.iter().map(ShelfLabel::as_str).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn label_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(ShelfLabel::from("A"), 1);
        assert_eq!(map.get("A"), Some(&1));
    }

    #[test]
    fn robot_position_wire_format() {
        assert_eq!(serde_json::to_string(&RobotPosition::Dock).unwrap(), "\"Dock\"");
        let at_b = RobotPosition::Shelf(ShelfLabel::from("B"));
        assert_eq!(serde_json::to_string(&at_b).unwrap(), "\"B\"");

        let parsed: RobotPosition = serde_json::from_str("\"Dock\"").unwrap();
        assert_eq!(parsed, RobotPosition::Dock);
        let parsed: RobotPosition = serde_json::from_str("\"C\"").unwrap();
        assert!(parsed.is_at("C"));
    }
}
