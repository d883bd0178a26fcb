//! `SmartStore` service binary.
//!
//! Wires the store, the HTTP API with its dashboard, and the
//! auto-simulate timer together, then runs until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `smartstore-config.yaml` (or the file named
//!    by `SMARTSTORE_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the store session from the configured shelf set
//! 4. Start the API server
//! 5. Start the auto-simulate loop
//! 6. Wait for `Ctrl-C`, then stop both tasks

mod error;
mod simulator;

use std::path::PathBuf;
use std::sync::Arc;

use smartstore_core::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LoggingConfig};
use smartstore_core::{AutoSimulateControl, StoreConfig, StoreSession};
use smartstore_observer::{AppState, ServerConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, the shelf set, or the server bind
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let (config, config_source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("smartstore-engine starting");
    match &config_source {
        Some(path) => info!(path = %path.display(), "Config file read"),
        None => warn!("{DEFAULT_CONFIG_PATH} not found, using defaults"),
    }
    info!(
        shelves = config.store.shelves.len(),
        seeded = config.simulation.seed.is_some(),
        "Configuration loaded"
    );

    // 3. Build the store.
    let session = StoreSession::from_config(&config).map_err(EngineError::from)?;
    let control = Arc::new(AutoSimulateControl::new(
        config.simulation.auto_simulate,
        config.simulation.interval_seconds,
    ));
    let state = Arc::new(AppState::with_auto_simulate(session.boxed(), control));
    info!(
        auto_simulate = state.auto_simulate.is_enabled(),
        interval_seconds = state.auto_simulate.interval_seconds(),
        "Store initialized"
    );

    // 4. Start the API server.
    let server_config = ServerConfig::from(&config.server);
    let server = smartstore_observer::spawn_observer(&server_config, Arc::clone(&state))
        .await
        .map_err(EngineError::from)?;
    info!(addr = %server.addr, "API server started");

    // 5. Start the auto-simulate loop.
    let timer = tokio::spawn(simulator::run_auto_simulate(Arc::clone(&state)));

    // 6. Run until interrupted.
    tokio::signal::ctrl_c().await.map_err(EngineError::from)?;
    info!("Shutdown signal received");

    timer.abort();
    server.handle.abort();

    let snapshot = state.snapshot().await;
    info!(
        tasks_completed = snapshot.tasks_completed,
        log_entries = snapshot.log.len(),
        "smartstore-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration.
///
/// Reads the file named by `SMARTSTORE_CONFIG`, or `smartstore-config.yaml`
/// in the working directory. A missing default file falls back to the
/// built-in defaults; a missing explicitly named file is an error.
fn load_config() -> Result<(StoreConfig, Option<PathBuf>), EngineError> {
    let explicit = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
    let path = explicit
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if explicit.is_some() || path.exists() {
        let config = StoreConfig::from_file(&path)?;
        Ok((config, Some(path)))
    } else {
        let config = StoreConfig::parse("")?;
        Ok((config, None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level` when set.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if logging.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| EngineError::Logging {
        message: format!("{e}"),
    })
}
