//! A store paired with the random source that drives it.
//!
//! [`StoreSession`] is the unit the hosting service puts behind its single
//! mutex. Holding the lock for one call covers the whole read-modify-write
//! of that command, including the draws.

use rand::SeedableRng;
use rand::rngs::StdRng;
use smartstore_types::StoreSnapshot;
use tracing::info;

use crate::config::StoreConfig;
use crate::draw::{BoxedDraws, DrawSource};
use crate::store::{Decision, Emptied, StoreError, StoreState};

/// A [`StoreState`] and its [`DrawSource`].
#[derive(Debug)]
pub struct StoreSession<D = StdRng> {
    state: StoreState,
    draws: D,
}

impl<D: DrawSource> StoreSession<D> {
    /// Pair an existing store with a draw source.
    pub const fn new(state: StoreState, draws: D) -> Self {
        Self { state, draws }
    }

    /// Mark a random shelf empty.
    ///
    /// # Errors
    ///
    /// See [`StoreState::simulate_empty`].
    pub fn simulate_empty(&mut self) -> Result<Emptied, StoreError> {
        self.state.simulate_empty(&mut self.draws)
    }

    /// Restock the highest-priority empty shelf.
    pub fn decide(&mut self) -> Decision {
        self.state.decide()
    }

    /// Read-only copy of the store.
    pub fn snapshot(&self) -> StoreSnapshot {
        self.state.snapshot()
    }

    /// The newest `limit` log entries, most recent first.
    pub fn recent_log(&self, limit: usize) -> Vec<String> {
        self.state
            .recent_log(limit)
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// Borrow the underlying store.
    pub const fn state(&self) -> &StoreState {
        &self.state
    }
}

impl<D: DrawSource + Send + 'static> StoreSession<D> {
    /// Erase the draw source type so the session fits a shared service.
    pub fn boxed(self) -> StoreSession<BoxedDraws> {
        StoreSession {
            state: self.state,
            draws: BoxedDraws::new(self.draws),
        }
    }
}

impl StoreSession<StdRng> {
    /// Build a session from configuration.
    ///
    /// Uses `simulation.seed` when set so runs are reproducible, OS
    /// entropy otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the configured shelf set is invalid.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let state = StoreState::new(config.store.shelf_pairs())?;
        let draws = match config.simulation.seed {
            Some(seed) => {
                info!(seed, "seeding shelf draws");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(state, draws))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::draw::ScriptedDraws;

    #[test]
    fn session_forwards_to_store() {
        let draws = ScriptedDraws::new().then(2, 6);
        let mut session = StoreSession::new(StoreState::with_default_shelves(), draws);

        let emptied = session.simulate_empty().unwrap();
        assert_eq!(emptied.shelf.as_str(), "C");

        let decision = session.decide();
        assert_eq!(decision.shelf().map(|l| l.as_str().to_owned()), Some("C".to_owned()));
        assert_eq!(session.state().tasks_completed(), 1);
        assert_eq!(
            session.recent_log(10),
            ["Robot restocked Shelf C", "Shelf C became empty"]
        );
    }

    #[test]
    fn seeded_sessions_are_reproducible() {
        let mut config = StoreConfig::default();
        config.simulation.seed = Some(17);

        let mut a = StoreSession::from_config(&config).unwrap();
        let mut b = StoreSession::from_config(&config).unwrap();
        for _ in 0..20 {
            assert_eq!(a.simulate_empty().unwrap(), b.simulate_empty().unwrap());
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn from_config_rejects_empty_shelf_set() {
        let mut config = StoreConfig::default();
        config.store.shelves.clear();
        assert_eq!(
            StoreSession::from_config(&config).unwrap_err(),
            StoreError::NoShelves
        );
    }
}
