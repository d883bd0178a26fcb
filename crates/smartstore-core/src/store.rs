//! The shelf state model and the restock decision rule.
//!
//! [`StoreState`] holds every shelf, the robot position, the completed task
//! counter and the event log. It exposes the three store operations:
//!
//! - [`simulate_empty`](StoreState::simulate_empty) -- mark a random shelf
//!   empty with a random empty-minutes value
//! - [`decide`](StoreState::decide) -- restock the empty shelf that has been
//!   empty the longest
//! - [`snapshot`](StoreState::snapshot) -- read-only copy of everything
//!
//! # Invariants
//!
//! - The shelf set is fixed at construction and never empty.
//! - A full shelf always has `empty_minutes == 0`.
//! - `tasks_completed` grows by exactly one per restock.
//! - The robot is at the dock or at the last restocked shelf.
//!
//! # Tie-break
//!
//! When several empty shelves share the highest `empty_minutes`, the one
//! with the lexicographically smallest label wins. Shelves live in a
//! [`BTreeMap`], so this is the first candidate in iteration order.

use std::collections::BTreeMap;

use smartstore_types::{
    DOCK, NO_EMPTY_SHELVES, RobotPosition, Shelf, ShelfLabel, ShelfStatus, StoreSnapshot,
    Traffic, recent_entries,
};
use tracing::{debug, info};

use crate::draw::{DrawSource, MAX_EMPTY_MINUTES, MIN_EMPTY_MINUTES};

/// Errors raised while building or operating on a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store was given no shelves.
    #[error("store needs at least one shelf")]
    NoShelves,

    /// Two shelves share a label.
    #[error("duplicate shelf label: {label}")]
    DuplicateShelf {
        /// The repeated label.
        label: ShelfLabel,
    },

    /// A shelf label is empty or whitespace.
    #[error("shelf labels must not be blank")]
    BlankLabel,

    /// A shelf uses the robot's dock sentinel as its label.
    #[error("shelf label {label} is reserved for the robot dock")]
    ReservedLabel {
        /// The offending label.
        label: ShelfLabel,
    },
}

/// Outcome of [`StoreState::simulate_empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emptied {
    /// The shelf that was emptied.
    pub shelf: ShelfLabel,
    /// The empty-minutes value it was given.
    pub minutes: u32,
    /// The log line appended to the store log.
    pub log_line: String,
}

impl Emptied {
    /// Confirmation message returned to the caller.
    pub fn message(&self) -> String {
        format!("Shelf {} is now empty", self.shelf)
    }
}

/// Outcome of [`StoreState::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The robot restocked a shelf.
    Restocked {
        /// The restocked shelf.
        shelf: ShelfLabel,
        /// How long it had been empty.
        minutes: u32,
        /// The log line appended to the store log.
        log_line: String,
    },
    /// No shelf was empty; nothing changed.
    NoWork,
}

impl Decision {
    /// The restocked shelf, if any.
    pub const fn shelf(&self) -> Option<&ShelfLabel> {
        match self {
            Self::Restocked { shelf, .. } => Some(shelf),
            Self::NoWork => None,
        }
    }

    /// Human-readable summary.
    pub fn message(&self) -> String {
        match self {
            Self::Restocked { shelf, .. } => format!("Robot is restocking Shelf {shelf}"),
            Self::NoWork => NO_EMPTY_SHELVES.to_owned(),
        }
    }
}

/// The whole mutable simulation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    shelves: BTreeMap<ShelfLabel, Shelf>,
    robot_position: RobotPosition,
    tasks_completed: u64,
    log: Vec<String>,
}

impl StoreState {
    /// Build a store with every shelf full and the robot at the dock.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if `shelves` is empty, repeats a label, or
    /// uses a blank or reserved label.
    pub fn new<I, L>(shelves: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (L, Traffic)>,
        L: Into<ShelfLabel>,
    {
        let mut map = BTreeMap::new();
        for (label, traffic) in shelves {
            let label: ShelfLabel = label.into();
            if label.as_str().trim().is_empty() {
                return Err(StoreError::BlankLabel);
            }
            if label.as_str() == DOCK {
                return Err(StoreError::ReservedLabel { label });
            }
            if map.contains_key(&label) {
                return Err(StoreError::DuplicateShelf { label });
            }
            map.insert(label, Shelf::full(traffic));
        }

        if map.is_empty() {
            return Err(StoreError::NoShelves);
        }

        Ok(Self {
            shelves: map,
            robot_position: RobotPosition::Dock,
            tasks_completed: 0,
            log: Vec::new(),
        })
    }

    /// The demo store: A (high), B (low), C (medium).
    pub fn with_default_shelves() -> Self {
        let shelves: BTreeMap<ShelfLabel, Shelf> = default_shelves()
            .into_iter()
            .map(|(label, traffic)| (ShelfLabel::from(label), Shelf::full(traffic)))
            .collect();
        Self {
            shelves,
            robot_position: RobotPosition::Dock,
            tasks_completed: 0,
            log: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // simulate_empty
    // -----------------------------------------------------------------------

    /// Mark one shelf empty.
    ///
    /// The shelf is drawn uniformly from all shelves regardless of status,
    /// so an already empty shelf can be re-emptied with a new minutes
    /// value. Minutes are clamped into `1..=15`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoShelves`] if the store has no shelves,
    /// which [`StoreState::new`] rules out.
    pub fn simulate_empty(&mut self, draws: &mut impl DrawSource) -> Result<Emptied, StoreError> {
        let count = self.shelves.len();
        let index = draws.pick_shelf(count).min(count.saturating_sub(1));
        let minutes = draws
            .empty_minutes()
            .clamp(MIN_EMPTY_MINUTES, MAX_EMPTY_MINUTES);

        let (label, shelf) = self
            .shelves
            .iter_mut()
            .nth(index)
            .ok_or(StoreError::NoShelves)?;

        if shelf.is_empty() {
            debug!(shelf = %label, previous = shelf.empty_minutes, "re-emptying shelf");
        }
        shelf.status = ShelfStatus::Empty;
        shelf.empty_minutes = minutes;

        let emptied = label.clone();
        let log_line = format!("Shelf {emptied} became empty");
        self.log.push(log_line.clone());

        info!(shelf = %emptied, minutes, "shelf became empty");

        Ok(Emptied {
            shelf: emptied,
            minutes,
            log_line,
        })
    }

    // -----------------------------------------------------------------------
    // decide
    // -----------------------------------------------------------------------

    /// The shelf [`decide`](Self::decide) would restock right now.
    ///
    /// Highest `empty_minutes` among empty shelves; ties go to the
    /// smallest label.
    pub fn next_restock(&self) -> Option<&ShelfLabel> {
        let mut best: Option<(&ShelfLabel, u32)> = None;
        for (label, shelf) in self.shelves.iter().filter(|(_, s)| s.is_empty()) {
            match best {
                Some((_, minutes)) if shelf.empty_minutes <= minutes => {}
                _ => best = Some((label, shelf.empty_minutes)),
            }
        }
        best.map(|(label, _)| label)
    }

    /// Restock the highest-priority empty shelf.
    ///
    /// Returns [`Decision::NoWork`] without touching any state when every
    /// shelf is full.
    pub fn decide(&mut self) -> Decision {
        let Some(label) = self.next_restock().cloned() else {
            debug!("no empty shelves, robot stays put");
            return Decision::NoWork;
        };

        let Some(shelf) = self.shelves.get_mut(&label) else {
            return Decision::NoWork;
        };
        let minutes = shelf.empty_minutes;
        shelf.status = ShelfStatus::Full;
        shelf.empty_minutes = 0;

        self.robot_position = RobotPosition::Shelf(label.clone());
        self.tasks_completed = self.tasks_completed.saturating_add(1);

        let log_line = format!("Robot restocked Shelf {label}");
        self.log.push(log_line.clone());

        info!(
            shelf = %label,
            minutes,
            tasks_completed = self.tasks_completed,
            "robot restocked shelf"
        );

        Decision::Restocked {
            shelf: label,
            minutes,
            log_line,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Read-only copy of the whole store.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            shelves: self.shelves.clone(),
            robot_position: self.robot_position.clone(),
            tasks_completed: self.tasks_completed,
            log: self.log.clone(),
        }
    }

    /// Look up a shelf by label.
    pub fn shelf(&self, label: &str) -> Option<&Shelf> {
        self.shelves.get(label)
    }

    /// All shelves in label order.
    pub const fn shelves(&self) -> &BTreeMap<ShelfLabel, Shelf> {
        &self.shelves
    }

    /// Where the robot is.
    pub const fn robot_position(&self) -> &RobotPosition {
        &self.robot_position
    }

    /// Number of completed restocks.
    pub const fn tasks_completed(&self) -> u64 {
        self.tasks_completed
    }

    /// Full event log, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The newest `limit` log entries, most recent first.
    pub fn recent_log(&self, limit: usize) -> Vec<&str> {
        recent_entries(&self.log, limit)
    }
}

impl Default for StoreState {
    fn default() -> Self {
        Self::with_default_shelves()
    }
}

/// The demo shelf set: A (high), B (low), C (medium).
pub fn default_shelves() -> Vec<(&'static str, Traffic)> {
    vec![("A", Traffic::High), ("B", Traffic::Low), ("C", Traffic::Medium)]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use smartstore_types::RECENT_LOG_LEN;

    use super::*;
    use crate::draw::ScriptedDraws;

    fn assert_full_means_zero(state: &StoreState) {
        for (label, shelf) in state.shelves() {
            if shelf.status == ShelfStatus::Full {
                assert_eq!(shelf.empty_minutes, 0, "full shelf {label} has minutes");
            }
        }
    }

    fn empty_labels(state: &StoreState) -> Vec<&str> {
        state
            .shelves()
            .iter()
            .filter(|(_, s)| s.is_empty())
            .map(|(l, _)| l.as_str())
            .collect()
    }

    // -- construction -------------------------------------------------------

    #[test]
    fn new_store_is_all_full_at_dock() {
        let state = StoreState::with_default_shelves();
        assert_eq!(state.shelves().len(), 3);
        assert!(state.shelves().values().all(|s| !s.is_empty()));
        assert!(state.shelves().values().all(|s| s.empty_minutes == 0));
        assert_eq!(state.robot_position(), &RobotPosition::Dock);
        assert_eq!(state.tasks_completed(), 0);
        assert!(state.log().is_empty());
        assert_eq!(state.shelf("A").unwrap().traffic, Traffic::High);
        assert_eq!(state.shelf("B").unwrap().traffic, Traffic::Low);
        assert_eq!(state.shelf("C").unwrap().traffic, Traffic::Medium);
    }

    #[test]
    fn default_matches_explicit_construction() {
        let explicit = StoreState::new(default_shelves()).unwrap();
        assert_eq!(explicit, StoreState::default());
    }

    #[test]
    fn rejects_empty_shelf_set() {
        let result = StoreState::new(Vec::<(&str, Traffic)>::new());
        assert_eq!(result.unwrap_err(), StoreError::NoShelves);
    }

    #[test]
    fn rejects_duplicate_labels() {
        let result = StoreState::new([("A", Traffic::Low), ("A", Traffic::High)]);
        assert_eq!(
            result.unwrap_err(),
            StoreError::DuplicateShelf {
                label: ShelfLabel::from("A")
            }
        );
    }

    #[test]
    fn rejects_blank_and_reserved_labels() {
        assert_eq!(
            StoreState::new([("  ", Traffic::Low)]).unwrap_err(),
            StoreError::BlankLabel
        );
        assert!(matches!(
            StoreState::new([("Dock", Traffic::Low)]).unwrap_err(),
            StoreError::ReservedLabel { .. }
        ));
    }

    // -- simulate_empty -----------------------------------------------------

    #[test]
    fn simulate_empty_marks_chosen_shelf_only() {
        let mut state = StoreState::with_default_shelves();
        let before = state.snapshot();
        let mut draws = ScriptedDraws::new().then(1, 7);

        let emptied = state.simulate_empty(&mut draws).unwrap();

        assert_eq!(emptied.shelf.as_str(), "B");
        assert_eq!(emptied.minutes, 7);
        assert_eq!(emptied.message(), "Shelf B is now empty");
        let b = state.shelf("B").unwrap();
        assert_eq!(b.status, ShelfStatus::Empty);
        assert_eq!(b.empty_minutes, 7);
        assert_eq!(state.shelf("A"), before.shelves.get("A"));
        assert_eq!(state.shelf("C"), before.shelves.get("C"));
        assert_eq!(state.log(), ["Shelf B became empty"]);
        assert_eq!(state.tasks_completed(), 0);
        assert_eq!(state.robot_position(), &RobotPosition::Dock);
    }

    #[test]
    fn simulate_empty_can_re_empty_an_empty_shelf() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new().then(0, 5).then(0, 11);

        state.simulate_empty(&mut draws).unwrap();
        state.simulate_empty(&mut draws).unwrap();

        let a = state.shelf("A").unwrap();
        assert_eq!(a.status, ShelfStatus::Empty);
        assert_eq!(a.empty_minutes, 11);
        assert_eq!(state.log().len(), 2);
    }

    #[test]
    fn simulate_empty_clamps_out_of_range_draws() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new().then(99, 0).then(0, 40);

        let first = state.simulate_empty(&mut draws).unwrap();
        assert_eq!(first.shelf.as_str(), "C");
        assert_eq!(first.minutes, MIN_EMPTY_MINUTES);

        let second = state.simulate_empty(&mut draws).unwrap();
        assert_eq!(second.minutes, MAX_EMPTY_MINUTES);
    }

    #[test]
    fn simulate_empty_with_rng_stays_in_range() {
        let mut state = StoreState::with_default_shelves();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let emptied = state.simulate_empty(&mut rng).unwrap();
            let shelf = state.shelf(emptied.shelf.as_str()).unwrap();
            assert!(shelf.is_empty());
            assert!((1..=15).contains(&shelf.empty_minutes));
        }
    }

    // -- decide -------------------------------------------------------------

    #[test]
    fn decide_with_all_full_changes_nothing() {
        let mut state = StoreState::with_default_shelves();
        let before = state.clone();

        let decision = state.decide();

        assert_eq!(decision, Decision::NoWork);
        assert_eq!(decision.message(), "No empty shelves");
        assert_eq!(state, before);
    }

    #[test]
    fn single_shelf_scenario() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new().then(0, 5);

        state.simulate_empty(&mut draws).unwrap();
        let a = state.shelf("A").unwrap();
        assert_eq!((a.status, a.empty_minutes), (ShelfStatus::Empty, 5));

        let decision = state.decide();
        assert_eq!(decision.shelf().map(ShelfLabel::as_str), Some("A"));
        let a = state.shelf("A").unwrap();
        assert_eq!((a.status, a.empty_minutes), (ShelfStatus::Full, 0));
        assert_eq!(state.tasks_completed(), 1);
        assert!(state.robot_position().is_at("A"));
        assert_eq!(
            state.log(),
            ["Shelf A became empty", "Robot restocked Shelf A"]
        );
    }

    #[test]
    fn decide_picks_longest_empty() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new().then(0, 5).then(1, 12);
        state.simulate_empty(&mut draws).unwrap();
        state.simulate_empty(&mut draws).unwrap();

        let decision = state.decide();

        assert_eq!(decision.shelf().map(ShelfLabel::as_str), Some("B"));
        let a = state.shelf("A").unwrap();
        assert_eq!((a.status, a.empty_minutes), (ShelfStatus::Empty, 5));
        assert_eq!(empty_labels(&state), ["A"]);
    }

    #[test]
    fn tie_goes_to_smallest_label() {
        for _ in 0..10 {
            let mut state = StoreState::with_default_shelves();
            let mut draws = ScriptedDraws::new().then(2, 8).then(1, 8);
            state.simulate_empty(&mut draws).unwrap();
            state.simulate_empty(&mut draws).unwrap();

            assert_eq!(state.next_restock().map(ShelfLabel::as_str), Some("B"));
            assert_eq!(state.decide().shelf().map(ShelfLabel::as_str), Some("B"));
            assert_eq!(state.decide().shelf().map(ShelfLabel::as_str), Some("C"));
            assert_eq!(state.decide(), Decision::NoWork);
        }
    }

    #[test]
    fn tasks_count_only_successful_restocks() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new().then(2, 3);

        state.decide();
        assert_eq!(state.tasks_completed(), 0);

        state.simulate_empty(&mut draws).unwrap();
        state.decide();
        state.decide();
        assert_eq!(state.tasks_completed(), 1);
        assert!(state.robot_position().is_at("C"));
    }

    #[test]
    fn invariants_hold_over_random_sequences() {
        let mut rng = SmallRng::seed_from_u64(2024);
        let mut state = StoreState::with_default_shelves();
        let mut restocks = 0_u64;

        for step in 0_u32..500 {
            if step % 3 == 0 {
                let previous_tasks = state.tasks_completed();
                match state.decide() {
                    Decision::Restocked { shelf, .. } => {
                        restocks += 1;
                        assert_eq!(state.tasks_completed(), previous_tasks + 1);
                        assert_eq!(state.robot_position(), &RobotPosition::Shelf(shelf));
                    }
                    Decision::NoWork => assert_eq!(state.tasks_completed(), previous_tasks),
                }
            } else {
                state.simulate_empty(&mut rng).unwrap();
            }
            assert_full_means_zero(&state);
            assert_eq!(state.shelves().len(), 3);
        }

        assert_eq!(state.tasks_completed(), restocks);
    }

    // -- log ----------------------------------------------------------------

    #[test]
    fn recent_log_after_twelve_operations() {
        let mut state = StoreState::with_default_shelves();
        let mut draws = ScriptedDraws::new();
        for i in 0..6 {
            draws.push(i % 3, 5);
        }
        for _ in 0..6 {
            state.simulate_empty(&mut draws).unwrap();
            state.decide();
        }

        assert_eq!(state.log().len(), 12);
        let recent = state.recent_log(RECENT_LOG_LEN);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent.first(), Some(&"Robot restocked Shelf C"));
        assert_eq!(recent.get(1), Some(&"Shelf C became empty"));
        assert_eq!(recent.last(), Some(&"Shelf B became empty"));
    }
}
