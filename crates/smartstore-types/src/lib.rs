//! Shared type definitions for the `SmartStore` restocking simulation.
//!
//! This crate is the single source of truth for the types that cross the
//! HTTP boundary. Types flow downstream to `TypeScript` via `ts-rs` for
//! the browser dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Shelf labels and the robot position
//! - [`enums`] -- Shelf status and traffic tags
//! - [`structs`] -- Shelves, store snapshots and update events
//! - [`api`] -- Request/response payloads for the store API

pub mod api;
pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use api::{
    AutoSimulateRequest, AutoSimulateStatus, DecideResponse, ErrorBody, HealthResponse, LogView,
    MetricsView, NO_EMPTY_SHELVES, SimulateEmptyResponse,
};
pub use enums::{ShelfStatus, Traffic};
pub use ids::{DOCK, RobotPosition, ShelfLabel};
pub use structs::{
    RECENT_LOG_LEN, Shelf, StoreEnvelope, StoreSnapshot, StoreUpdate, UpdateKind, recent_entries,
};
