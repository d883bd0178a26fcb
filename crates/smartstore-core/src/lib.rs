//! Shelf state model and restock decision rule for the `SmartStore`
//! simulation.
//!
//! # Modules
//!
//! - [`store`] -- [`StoreState`] with `simulate_empty`, `decide` and
//!   `snapshot`, plus the construction rules for the shelf set.
//! - [`draw`] -- [`DrawSource`] trait for the random draws and
//!   [`ScriptedDraws`] for fixed outcomes.
//! - [`session`] -- [`StoreSession`], a store paired with its draw source.
//! - [`autosim`] -- Shared switch and interval for automatic emptying.
//! - [`config`] -- Configuration loading from `smartstore-config.yaml`.
//!
//! [`StoreState`]: store::StoreState
//! [`DrawSource`]: draw::DrawSource
//! [`ScriptedDraws`]: draw::ScriptedDraws
//! [`StoreSession`]: session::StoreSession

pub mod autosim;
pub mod config;
pub mod draw;
pub mod session;
pub mod store;

pub use autosim::AutoSimulateControl;
pub use config::{ConfigError, StoreConfig};
pub use draw::{BoxedDraws, DrawSource, ScriptedDraws};
pub use session::StoreSession;
pub use store::{Decision, Emptied, StoreError, StoreState};
