//! Shared application state for the store API server.
//!
//! [`AppState`] owns the single mutex around the [`StoreSession`], the
//! broadcast channel that streams [`StoreUpdate`]s, and the shared
//! auto-simulation switch. Every command goes through the methods here so
//! the HTTP handlers and the engine's timer loop use the same locked path.

use std::sync::Arc;

use chrono::Utc;
use smartstore_core::{AutoSimulateControl, BoxedDraws, Decision, Emptied, StoreError, StoreSession};
use smartstore_types::{StoreSnapshot, StoreUpdate, UpdateKind};
use tokio::sync::{Mutex, broadcast};

/// Capacity of the broadcast channel for store updates.
///
/// A subscriber that falls behind by more than this many messages
/// receives [`broadcast::error::RecvError::Lagged`] and skips ahead.
const BROADCAST_CAPACITY: usize = 256;

/// The session type the service locks around.
pub type SharedSession = Arc<Mutex<StoreSession<BoxedDraws>>>;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Broadcast sender for store updates.
    pub tx: broadcast::Sender<StoreUpdate>,
    /// The store and its draw source behind one mutex.
    pub session: SharedSession,
    /// Auto-simulation switch shared with the engine loop.
    pub auto_simulate: Arc<AutoSimulateControl>,
}

impl AppState {
    /// Wrap a session with auto-simulation switched off.
    pub fn new(session: StoreSession<BoxedDraws>) -> Self {
        Self::with_auto_simulate(session, Arc::new(AutoSimulateControl::default()))
    }

    /// Wrap a session with an existing auto-simulation control block.
    pub fn with_auto_simulate(
        session: StoreSession<BoxedDraws>,
        auto_simulate: Arc<AutoSimulateControl>,
    ) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            session: Arc::new(Mutex::new(session)),
            auto_simulate,
        }
    }

    /// Subscribe to the update stream.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreUpdate> {
        self.tx.subscribe()
    }

    /// Publish an update to all subscribers.
    ///
    /// Returns the number of receivers. Returns 0 if nobody is listening
    /// (this is not an error).
    pub fn broadcast(&self, update: &StoreUpdate) -> usize {
        // send returns Err only when there are zero receivers.
        self.tx.send(update.clone()).unwrap_or(0)
    }

    // -----------------------------------------------------------------------
    // Store operations
    // -----------------------------------------------------------------------

    /// Run `simulate_empty` under the lock and broadcast the result.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the store.
    pub async fn simulate_empty(&self) -> Result<Emptied, StoreError> {
        let (emptied, store) = {
            let mut session = self.session.lock().await;
            let emptied = session.simulate_empty()?;
            (emptied, session.snapshot())
        };

        self.broadcast(&StoreUpdate {
            kind: UpdateKind::ShelfEmptied,
            shelf: emptied.shelf.clone(),
            log_line: emptied.log_line.clone(),
            store,
            at: Utc::now(),
        });

        Ok(emptied)
    }

    /// Run `decide` under the lock and broadcast a restock.
    ///
    /// Nothing is broadcast for the no-work outcome since nothing changed.
    pub async fn decide(&self) -> Decision {
        let (decision, store) = {
            let mut session = self.session.lock().await;
            let decision = session.decide();
            let store = match decision {
                Decision::Restocked { .. } => Some(session.snapshot()),
                Decision::NoWork => None,
            };
            (decision, store)
        };

        if let (Decision::Restocked { shelf, log_line, .. }, Some(store)) = (&decision, store) {
            self.broadcast(&StoreUpdate {
                kind: UpdateKind::ShelfRestocked,
                shelf: shelf.clone(),
                log_line: log_line.clone(),
                store,
                at: Utc::now(),
            });
        }

        decision
    }

    /// Read-only snapshot of the store.
    pub async fn snapshot(&self) -> StoreSnapshot {
        self.session.lock().await.snapshot()
    }

    /// The newest `limit` log entries, most recent first.
    pub async fn recent_log(&self, limit: usize) -> Vec<String> {
        self.session.lock().await.recent_log(limit)
    }
}
