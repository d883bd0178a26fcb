//! HTTP API server for the `SmartStore` simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Store endpoints** (`/state`, `/simulate_empty`, `/decide`,
//!   `/health`) consumed by the dashboards
//! - **Extra read endpoints** (`/api/log`, `/api/metrics`)
//! - **Operator endpoints** (`/api/auto-simulate`) for the timer that
//!   empties shelves automatically
//! - **`WebSocket` endpoint** (`/ws/updates`) streaming every change via
//!   [`tokio::sync::broadcast`]
//! - **HTML dashboard** (`GET /`) with the shelf grid, metrics, controls
//!   and the recent action log
//!
//! # Architecture
//!
//! One [`StoreSession`](smartstore_core::StoreSession) sits behind a
//! single mutex in [`AppState`]. Each command holds the lock for its full
//! read-modify-write, so concurrent requests are serialized and no update
//! is lost. Updates are broadcast after the lock is released.

pub mod commands;
pub mod error;
pub mod handlers;
pub mod operator;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, serve_listener, start_server};
pub use startup::{RunningServer, StartupError, spawn_observer};
pub use state::AppState;
