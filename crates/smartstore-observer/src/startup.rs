//! Server startup helper for embedding in the engine binary.
//!
//! [`spawn_observer`] binds the listener up front, so an address already
//! in use is reported to the caller, then serves on a background task
//! alongside the auto-simulate loop.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError, serve_listener};
use crate::state::AppState;

/// Errors that can occur when spawning the API server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// A server running on a background task.
#[derive(Debug)]
pub struct RunningServer {
    /// The address actually bound (useful with port 0).
    pub addr: SocketAddr,
    /// Handle to the serving task.
    pub handle: JoinHandle<()>,
}

/// Bind the configured address and serve on a background Tokio task.
///
/// The server runs until the runtime shuts down or the task is aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the address is invalid or cannot
/// be bound.
pub async fn spawn_observer(
    config: &ServerConfig,
    state: Arc<AppState>,
) -> Result<RunningServer, StartupError> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {addr}: {e}")))?;
    let addr = listener
        .local_addr()
        .map_err(|e| ServerError::Bind(format!("no local address: {e}")))?;

    let handle = tokio::spawn(async move {
        if let Err(e) = serve_listener(listener, state).await {
            tracing::error!(error = %e, "API server exited with error");
        }
    });

    tracing::info!(%addr, "API server spawned on background task");

    Ok(RunningServer { addr, handle })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use smartstore_core::{ScriptedDraws, StoreSession, StoreState};

    use super::*;

    #[tokio::test]
    async fn spawn_binds_ephemeral_port() {
        let state = Arc::new(AppState::new(
            StoreSession::new(StoreState::with_default_shelves(), ScriptedDraws::new()).boxed(),
        ));
        let config = ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
        };

        let running = spawn_observer(&config, state).await.unwrap();
        assert_ne!(running.addr.port(), 0);
        running.handle.abort();
    }

    #[tokio::test]
    async fn port_in_use_is_reported() {
        let held = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = held.local_addr().unwrap().port();
        let state = Arc::new(AppState::new(
            StoreSession::new(StoreState::with_default_shelves(), ScriptedDraws::new()).boxed(),
        ));
        let config = ServerConfig {
            host: "127.0.0.1".to_owned(),
            port,
        };

        assert!(matches!(
            spawn_observer(&config, state).await,
            Err(StartupError::Server(ServerError::Bind(_)))
        ));
    }
}
