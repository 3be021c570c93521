// BFGMiner Monitor - Free and Open Source Software Statement
//
// This project, bfgminer-monitor, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/web_server.rs
// Version: 1.0.0
// Developer: OIEIEIO <oieieio@protonmail.com>
//
// This file implements the optional web view for the monitor. It serves the
// text panel, the raw snapshot as JSON, and pushes the rendered view over a
// WebSocket whenever a new snapshot is published.
//
// Tree Location:
// - src/web_server.rs (web server and WebSocket handler)
// - Depends on: axum, serde_json, monitor::snapshot, view

use axum::{
    Json, Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::Response,
    routing::get,
};
use bfgminer_monitor::{MinerView, Snapshot};
use log::{debug, error, info};
use std::sync::Arc;
use tokio::sync::watch;

const LOG_TARGET: &str = "bfgmon::web_server";

#[derive(Clone)]
pub struct WebState {
    pub id: String,
    pub title: String,
    pub snapshots: watch::Receiver<Arc<Snapshot>>,
}

impl WebState {
    fn view(&self) -> MinerView {
        let snapshot = self.snapshots.borrow().clone();
        MinerView::render(&self.id, &self.title, &snapshot)
    }
}

/// Start the web server on 0.0.0.0:<port>
///
/// Routes: `/` (text panel), `/api/snapshot`, `/api/view` and `/ws`
pub async fn start_web_server(state: WebState, port: u16) {
    let app = Router::new()
        .route("/", get(panel_handler))
        .route("/api/snapshot", get(snapshot_handler))
        .route("/api/view", get(view_handler))
        .route("/ws", get(websocket_handler))
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(target: LOG_TARGET, "Failed to bind web server to port {}: {}", port, e);
            return;
        }
    };

    info!(target: LOG_TARGET, "Web view available at: http://localhost:{}", port);
    info!(target: LOG_TARGET, "WebSocket endpoint: ws://localhost:{}/ws", port);

    if let Err(e) = axum::serve(listener, app).await {
        error!(target: LOG_TARGET, "Web server error: {}", e);
    }
}

async fn panel_handler(State(state): State<WebState>) -> String {
    state.view().to_string()
}

async fn snapshot_handler(State(state): State<WebState>) -> Json<Snapshot> {
    let snapshot = state.snapshots.borrow().clone();
    Json(Snapshot::clone(&snapshot))
}

async fn view_handler(State(state): State<WebState>) -> Json<MinerView> {
    Json(state.view())
}

async fn websocket_handler(ws: WebSocketUpgrade, State(state): State<WebState>) -> Response {
    debug!(target: LOG_TARGET, "WebSocket connection request received");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Push the rendered view once on connect and again on every publication
async fn handle_socket(mut socket: WebSocket, state: WebState) {
    let mut snapshots = state.snapshots.clone();
    info!(target: LOG_TARGET, "WebSocket client connected");

    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        let view = MinerView::render(&state.id, &state.title, &snapshot);

        let json = match serde_json::to_string(&view) {
            Ok(json) => json,
            Err(e) => {
                error!(target: LOG_TARGET, "Failed to serialize view: {}", e);
                break;
            }
        };

        if let Err(e) = socket.send(Message::Text(json)).await {
            debug!(target: LOG_TARGET, "WebSocket client disconnected: {}", e);
            break;
        }

        if snapshots.changed().await.is_err() {
            break;
        }
    }

    info!(target: LOG_TARGET, "WebSocket connection closed");
}

// Changelog:
// - v1.0.0 (2026-10-16): Web view for the monitor.
//   - Serves the text panel, snapshot JSON and rendered view JSON.
//   - WebSocket pushes follow snapshot publications instead of a fixed timer.
