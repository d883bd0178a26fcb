//! Client side of the `SmartStore` simulation.
//!
//! - [`client`] -- [`StoreClient`], a typed `reqwest` client for every
//!   store endpoint.
//! - [`render`] -- text rendering of the shelf grid, metrics and recent
//!   action log.
//! - [`error`] -- [`ClientError`], which separates an unreachable backend
//!   from an answer the backend gave.
//!
//! The `smartstore-dashboard` binary in this crate combines the two into
//! a terminal dashboard.
//!
//! [`StoreClient`]: client::StoreClient
//! [`ClientError`]: error::ClientError

pub mod client;
pub mod error;
pub mod render;

pub use client::{DEFAULT_TIMEOUT, DEFAULT_URL, StoreClient};
pub use error::ClientError;
