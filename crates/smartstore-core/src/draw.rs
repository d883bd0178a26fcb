//! Random draw seam for the `simulate_empty` command.
//!
//! The store never owns a random generator. Every draw goes through a
//! [`DrawSource`], so production code can hand in a seeded [`rand`]
//! generator and tests can hand in [`ScriptedDraws`] with fixed outcomes.

use std::collections::VecDeque;

/// Lowest empty-minutes value a shelf can be given.
pub const MIN_EMPTY_MINUTES: u32 = 1;

/// Highest empty-minutes value a shelf can be given.
pub const MAX_EMPTY_MINUTES: u32 = 15;

/// A source of the two random draws `simulate_empty` needs.
///
/// Implementations should return values inside the documented ranges.
/// The store clamps out-of-range values, so a misbehaving source cannot
/// break the shelf invariants.
pub trait DrawSource {
    /// Pick a shelf index uniformly in `0..count`.
    fn pick_shelf(&mut self, count: usize) -> usize;

    /// Draw an empty-minutes value uniformly in
    /// `MIN_EMPTY_MINUTES..=MAX_EMPTY_MINUTES`.
    fn empty_minutes(&mut self) -> u32;
}

impl<R: rand::Rng + ?Sized> DrawSource for R {
    fn pick_shelf(&mut self, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        self.random_range(0..count)
    }

    fn empty_minutes(&mut self) -> u32 {
        self.random_range(MIN_EMPTY_MINUTES..=MAX_EMPTY_MINUTES)
    }
}

/// A [`DrawSource`] that replays fixed outcomes.
///
/// Shelf indices and minute values are consumed in order. Once a queue is
/// exhausted, index `0` and [`MIN_EMPTY_MINUTES`] are returned.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    shelves: VecDeque<usize>,
    minutes: VecDeque<u32>,
}

impl ScriptedDraws {
    /// Create an empty script.
    pub const fn new() -> Self {
        Self {
            shelves: VecDeque::new(),
            minutes: VecDeque::new(),
        }
    }

    /// Queue one `simulate_empty` outcome: shelf index and minutes.
    #[must_use]
    pub fn then(mut self, shelf_index: usize, minutes: u32) -> Self {
        self.push(shelf_index, minutes);
        self
    }

    /// Queue one `simulate_empty` outcome in place.
    pub fn push(&mut self, shelf_index: usize, minutes: u32) {
        self.shelves.push_back(shelf_index);
        self.minutes.push_back(minutes);
    }

    /// Number of outcomes still queued.
    pub fn remaining(&self) -> usize {
        self.shelves.len().min(self.minutes.len())
    }
}

impl DrawSource for ScriptedDraws {
    fn pick_shelf(&mut self, _count: usize) -> usize {
        self.shelves.pop_front().unwrap_or(0)
    }

    fn empty_minutes(&mut self) -> u32 {
        self.minutes.pop_front().unwrap_or(MIN_EMPTY_MINUTES)
    }
}

/// A type-erased [`DrawSource`] that can live behind a shared lock.
///
/// The HTTP layer stores one of these so the same service type works
/// with a seeded generator in production and scripted draws in tests.
pub struct BoxedDraws(Box<dyn DrawSource + Send>);

impl BoxedDraws {
    /// Box any sendable draw source.
    pub fn new(draws: impl DrawSource + Send + 'static) -> Self {
        Self(Box::new(draws))
    }
}

impl core::fmt::Debug for BoxedDraws {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("BoxedDraws")
    }
}

impl DrawSource for BoxedDraws {
    fn pick_shelf(&mut self, count: usize) -> usize {
        self.0.pick_shelf(count)
    }

    fn empty_minutes(&mut self) -> u32 {
        self.0.empty_minutes()
    }
}
