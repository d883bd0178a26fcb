//! Read-only endpoint handlers and the HTML dashboard.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | HTML dashboard |
//! | `GET` | `/health` | Liveness message |
//! | `GET` | `/state` | Full store snapshot wrapped as `{"store": ...}` |
//! | `GET` | `/api/log` | Recent log entries, newest first |
//! | `GET` | `/api/metrics` | Task count, empty shelf count, robot position |

use std::fmt::Write as _;
use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use smartstore_types::{
    HealthResponse, LogView, MetricsView, RECENT_LOG_LEN, StoreEnvelope, StoreSnapshot,
};

use crate::error::ObserverError;
use crate::state::AppState;

/// Largest `limit` accepted by `GET /api/log`.
const MAX_LOG_LIMIT: usize = 1000;

/// How often the dashboard re-polls `/state`, in milliseconds.
const POLL_INTERVAL_MS: u64 = 2000;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the `GET /api/log` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct LogQuery {
    /// Maximum number of entries to return (default 10, max 1000).
    pub limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness check.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "SmartStore Backend Running".to_owned(),
    })
}

// ---------------------------------------------------------------------------
// GET /state
// ---------------------------------------------------------------------------

/// Return the full store: shelves, robot position, task count and log.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StoreEnvelope> {
    Json(StoreEnvelope {
        store: state.snapshot().await,
    })
}

// ---------------------------------------------------------------------------
// GET /api/log
// ---------------------------------------------------------------------------

/// Recent log entries, most recent first.
///
/// # Query Parameters
///
/// - `limit`: number of entries (default 10, max 1000).
pub async fn get_log(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LogQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ObserverError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(RECENT_LOG_LEN);
    if limit == 0 {
        return Err(ObserverError::InvalidRequest(
            "limit must be at least 1".to_owned(),
        ));
    }
    let entries = state.recent_log(limit.min(MAX_LOG_LIMIT)).await;

    Ok(Json(LogView {
        count: entries.len(),
        entries,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/metrics
// ---------------------------------------------------------------------------

/// The three dashboard metrics.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Json<MetricsView> {
    let snapshot = state.snapshot().await;
    Json(MetricsView {
        tasks_completed: snapshot.tasks_completed,
        empty_shelves: snapshot.empty_shelves(),
        robot_position: snapshot.robot_position,
    })
}

// ---------------------------------------------------------------------------
// GET / -- dashboard
// ---------------------------------------------------------------------------

/// Serve the dashboard.
///
/// The page is rendered with the current state so it is useful without
/// scripts, then refreshes itself by polling `/state`.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.snapshot().await;
    let auto = state.auto_simulate.status();

    let shelves = render_shelves(&snapshot);
    let log = render_log(&snapshot);
    let tasks = snapshot.tasks_completed;
    let empty = snapshot.empty_shelves();
    let robot = escape_html(&snapshot.robot_position.to_string());
    let auto_checked = if auto.enabled { " checked" } else { "" };
    let interval = auto.interval_seconds;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>SmartStore</title>
    <style>{DASHBOARD_CSS}</style>
</head>
<body>
    <h1>SmartStore</h1>
    <p class="subtitle">Retail restocking simulation</p>

    <h2>Controls</h2>
    <div class="controls">
        <button id="simulate">Simulate Shelf Becoming Empty</button>
        <button id="decide">Ask Robot to Restock</button>
        <label><input type="checkbox" id="auto"{auto_checked}> Auto-simulate empty shelves</label>
        <label>every <input type="range" id="interval" min="1" max="10" value="{interval}">
            <span id="interval-value">{interval}</span>s</label>
    </div>
    <p id="notice" class="notice"></p>

    <h2>Shelf Status</h2>
    <div id="shelves">{shelves}</div>

    <h2>Metrics</h2>
    <div>
        <div class="metric">
            <div class="label">Total Restocking Tasks</div>
            <div class="value" id="tasks">{tasks}</div>
        </div>
        <div class="metric">
            <div class="label">Empty Shelves</div>
            <div class="value" id="empty">{empty}</div>
        </div>
        <div class="metric">
            <div class="label">Robot Position</div>
            <div class="value" id="robot">{robot}</div>
        </div>
    </div>

    <h2>Action Log</h2>
    <ul id="log">{log}</ul>

    <script>const POLL_INTERVAL_MS = {POLL_INTERVAL_MS}; const RECENT_LOG_LEN = {RECENT_LOG_LEN};</script>
    <script>{DASHBOARD_JS}</script>
</body>
</html>"#
    ))
}

/// Render the shelf grid, one card per shelf in label order.
fn render_shelves(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();
    for (label, shelf) in &snapshot.shelves {
        let robot = if snapshot.robot_position.is_at(label.as_str()) {
            " &#129302;"
        } else {
            ""
        };
        let (class, status) = if shelf.is_empty() {
            ("empty", "Empty")
        } else {
            ("full", "Full")
        };
        let _ = write!(
            out,
            r#"<div class="shelf {class}"><h3>Shelf {label}{robot}</h3><p>Status: {status}</p><p>Traffic: {traffic}</p><p>Empty Minutes: {minutes}</p></div>"#,
            label = escape_html(label.as_str()),
            traffic = shelf.traffic,
            minutes = shelf.empty_minutes,
        );
    }
    out
}

/// Render the newest log entries, most recent first.
fn render_log(snapshot: &StoreSnapshot) -> String {
    let mut out = String::new();
    for entry in snapshot.recent_log(RECENT_LOG_LEN) {
        let _ = write!(out, "<li>{}</li>", escape_html(entry));
    }
    out
}

/// Escape the five HTML-significant characters.
fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const DASHBOARD_CSS: &str = r"
body {
    background: #0d1117;
    color: #c9d1d9;
    font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
    padding: 2rem;
    max-width: 960px;
    margin: 0 auto;
}
h1 { color: #58a6ff; margin-bottom: 0.25rem; }
.subtitle { color: #8b949e; margin-top: 0; }
button {
    background: #21262d;
    color: #c9d1d9;
    border: 1px solid #30363d;
    border-radius: 6px;
    padding: 0.5rem 1rem;
    margin-right: 0.5rem;
    cursor: pointer;
}
button:hover { border-color: #58a6ff; }
.controls label { margin-right: 1rem; }
.notice { min-height: 1.2rem; color: #d29922; }
.notice.ok { color: #3fb950; }
.notice.err { color: #f85149; }
.shelf, .metric {
    display: inline-block;
    background: #161b22;
    border: 1px solid #30363d;
    border-radius: 6px;
    padding: 1rem 1.5rem;
    margin: 0.5rem 0.5rem 0.5rem 0;
    min-width: 140px;
    vertical-align: top;
}
.shelf h3 { margin-top: 0; }
.shelf.full { border-color: #3fb950; }
.shelf.empty { border-color: #f85149; }
.shelf p { margin: 0.2rem 0; }
.metric .label { color: #8b949e; font-size: 0.85rem; }
.metric .value { color: #58a6ff; font-size: 1.5rem; font-weight: bold; }
ul { list-style: none; padding: 0; }
li { padding: 0.2rem 0; }
li::before { content: '- '; color: #7ee787; }
";

const DASHBOARD_JS: &str = r"
const notice = document.getElementById('notice');

function say(text, kind) {
    notice.textContent = text;
    notice.className = 'notice ' + (kind || '');
}

function renderShelves(store) {
    const grid = document.getElementById('shelves');
    grid.replaceChildren();
    for (const [name, shelf] of Object.entries(store.shelves)) {
        const card = document.createElement('div');
        card.className = 'shelf ' + shelf.status;
        const title = document.createElement('h3');
        title.textContent = 'Shelf ' + name + (store.robot_position === name ? ' \u{1F916}' : '');
        card.appendChild(title);
        for (const line of [
            'Status: ' + (shelf.status === 'full' ? 'Full' : 'Empty'),
            'Traffic: ' + shelf.traffic,
            'Empty Minutes: ' + shelf.empty_minutes,
        ]) {
            const p = document.createElement('p');
            p.textContent = line;
            card.appendChild(p);
        }
        grid.appendChild(card);
    }
}

function renderLog(store) {
    const list = document.getElementById('log');
    list.replaceChildren();
    for (const entry of store.log.slice(-RECENT_LOG_LEN).reverse()) {
        const li = document.createElement('li');
        li.textContent = entry;
        list.appendChild(li);
    }
}

function render(store) {
    renderShelves(store);
    renderLog(store);
    const empty = Object.values(store.shelves).filter((s) => s.status === 'empty').length;
    document.getElementById('tasks').textContent = store.tasks_completed;
    document.getElementById('empty').textContent = empty;
    document.getElementById('robot').textContent = store.robot_position;
}

async function refresh() {
    try {
        const res = await fetch('/state');
        const body = await res.json();
        render(body.store);
    } catch (e) {
        say('Backend not running yet. Please wait a few seconds.', 'err');
    }
}

async function post(path, body) {
    const res = await fetch(path, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body),
    });
    return res.json();
}

document.getElementById('simulate').addEventListener('click', async () => {
    try {
        const result = await post('/simulate_empty');
        say(result.message, 'ok');
    } catch (e) {
        say('Backend not reachable: ' + e, 'err');
    }
    refresh();
});

document.getElementById('decide').addEventListener('click', async () => {
    try {
        const result = await post('/decide');
        if ('decision' in result) {
            say('Robot is restocking Shelf ' + result.decision, 'ok');
        } else {
            say(result.message || 'No empty shelves');
        }
    } catch (e) {
        say('Backend not reachable: ' + e, 'err');
    }
    refresh();
});

const auto = document.getElementById('auto');
const interval = document.getElementById('interval');
const intervalValue = document.getElementById('interval-value');

async function pushAutoSimulate() {
    intervalValue.textContent = interval.value;
    try {
        await post('/api/auto-simulate', {
            enabled: auto.checked,
            interval_seconds: Number(interval.value),
        });
    } catch (e) {
        say('Backend not reachable: ' + e, 'err');
    }
}

auto.addEventListener('change', pushAutoSimulate);
interval.addEventListener('change', pushAutoSimulate);
interval.addEventListener('input', () => { intervalValue.textContent = interval.value; });

setInterval(refresh, POLL_INTERVAL_MS);
";
