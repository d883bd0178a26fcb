//! Integration tests for the `/ws/updates` stream.
//!
//! Each test spawns the real server on `127.0.0.1:0`, connects a
//! `WebSocket` client, and drives the store over HTTP.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use smartstore_core::{ScriptedDraws, StoreSession, StoreState};
use smartstore_observer::{AppState, RunningServer, ServerConfig, spawn_observer};
use smartstore_types::{ShelfStatus, StoreEnvelope, StoreUpdate, UpdateKind};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

const FRAME_TIMEOUT: Duration = Duration::from_secs(5);

async fn start(draws: ScriptedDraws) -> (Arc<AppState>, RunningServer) {
    let session = StoreSession::new(StoreState::with_default_shelves(), draws);
    let state = Arc::new(AppState::new(session.boxed()));
    let config = ServerConfig {
        host: "127.0.0.1".to_owned(),
        port: 0,
    };
    let running = spawn_observer(&config, Arc::clone(&state)).await.unwrap();
    (state, running)
}

async fn connect(running: &RunningServer) -> Client {
    let (socket, _) = connect_async(format!("ws://{}/ws/updates", running.addr))
        .await
        .unwrap();
    socket
}

async fn next_text(socket: &mut Client) -> String {
    loop {
        let frame = tokio::time::timeout(FRAME_TIMEOUT, socket.next())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        if let Message::Text(text) = frame {
            return text.as_str().to_owned();
        }
    }
}

#[tokio::test]
async fn first_frame_is_the_current_store() {
    let (state, running) = start(ScriptedDraws::new().then(1, 4)).await;
    state.simulate_empty().await.unwrap();

    let mut socket = connect(&running).await;
    let envelope: StoreEnvelope = serde_json::from_str(&next_text(&mut socket).await).unwrap();

    let shelf = envelope.store.shelves.get("B").unwrap();
    assert_eq!(shelf.status, ShelfStatus::Empty);
    assert_eq!(shelf.empty_minutes, 4);
    assert_eq!(envelope.store.log, ["Shelf B became empty"]);

    running.handle.abort();
}

#[tokio::test]
async fn http_commands_are_streamed() {
    let (_state, running) = start(ScriptedDraws::new().then(0, 6)).await;
    let mut socket = connect(&running).await;

    let envelope: StoreEnvelope = serde_json::from_str(&next_text(&mut socket).await).unwrap();
    assert!(envelope.store.log.is_empty());

    let http = reqwest::Client::new();
    let base = format!("http://{}", running.addr);
    let response = http
        .post(format!("{base}/simulate_empty"))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let update: StoreUpdate = serde_json::from_str(&next_text(&mut socket).await).unwrap();
    assert_eq!(update.kind, UpdateKind::ShelfEmptied);
    assert_eq!(update.log_line, "Shelf A became empty");
    assert_eq!(update.store.shelves.get("A").unwrap().empty_minutes, 6);

    http.post(format!("{base}/decide")).send().await.unwrap();

    let update: StoreUpdate = serde_json::from_str(&next_text(&mut socket).await).unwrap();
    assert_eq!(update.kind, UpdateKind::ShelfRestocked);
    assert_eq!(update.log_line, "Robot restocked Shelf A");
    assert_eq!(update.store.tasks_completed, 1);

    running.handle.abort();
}
