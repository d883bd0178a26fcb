//! `WebSocket` handler for live store updates.
//!
//! Clients connect to `GET /ws/updates`. The first text frame is the
//! current store as a [`StoreEnvelope`], the same shape `GET /state`
//! returns. After that, each frame is a [`StoreUpdate`] sent when a shelf
//! is emptied or restocked, whether by an HTTP command or the
//! auto-simulate timer.
//!
//! A client that falls behind the broadcast channel is sent a fresh
//! envelope in place of the updates it missed.

use std::ops::ControlFlow;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use serde::Serialize;
use smartstore_types::{StoreEnvelope, StoreUpdate};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade to a `WebSocket` and stream the store to the client.
///
/// # Route
///
/// `GET /ws/updates`
pub async fn ws_updates(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| stream_store(socket, state))
}

async fn stream_store(mut socket: WebSocket, state: Arc<AppState>) {
    // Subscribe first so nothing lands between the snapshot and the stream.
    let mut updates = state.subscribe();
    debug!(subscribers = state.tx.receiver_count(), "store stream opened");

    if send_snapshot(&mut socket, &state).await.is_break() {
        return;
    }

    loop {
        let step = tokio::select! {
            update = updates.recv() => forward_update(&mut socket, &state, update).await,
            incoming = socket.recv() => read_client(incoming),
        };
        if step.is_break() {
            break;
        }
    }

    debug!("store stream closed");
}

async fn forward_update(
    socket: &mut WebSocket,
    state: &AppState,
    update: Result<StoreUpdate, RecvError>,
) -> ControlFlow<()> {
    match update {
        Ok(update) => send_frame(socket, &update).await,
        Err(RecvError::Lagged(missed)) => {
            debug!(missed, "store stream lagged, resending snapshot");
            send_snapshot(socket, state).await
        }
        Err(RecvError::Closed) => ControlFlow::Break(()),
    }
}

/// Clients only listen. Pings are answered by the socket itself.
fn read_client(incoming: Option<Result<Message, axum::Error>>) -> ControlFlow<()> {
    match incoming {
        None | Some(Ok(Message::Close(_))) => ControlFlow::Break(()),
        Some(Err(e)) => {
            debug!(error = %e, "store stream read failed");
            ControlFlow::Break(())
        }
        Some(Ok(_)) => ControlFlow::Continue(()),
    }
}

async fn send_snapshot(socket: &mut WebSocket, state: &AppState) -> ControlFlow<()> {
    let envelope = StoreEnvelope {
        store: state.snapshot().await,
    };
    send_frame(socket, &envelope).await
}

async fn send_frame<T: Serialize>(socket: &mut WebSocket, frame: &T) -> ControlFlow<()> {
    let text = match serde_json::to_string(frame) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "store frame did not serialize");
            return ControlFlow::Continue(());
        }
    };
    if socket.send(Message::Text(text.into())).await.is_err() {
        return ControlFlow::Break(());
    }
    ControlFlow::Continue(())
}
