//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::stream::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{ConnectionHandle, ConnectionIdFactory},
    ui::{dispatcher::Dispatcher, heartbeat::spawn_heartbeat, state::AppState, writer::{close_sink, write_frames}},
};

/// How long a closing connection may spend sending its close frame
const CLOSE_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_failed_upgrade(|e: axum::Error| {
        tracing::warn!(error = %e, "WebSocket upgrade failed");
    })
    .on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one connection from upgrade to close.
///
/// Three tasks share the connection: the writer draining the outbound queue,
/// the heartbeat, and the dispatcher running on this task. All of them are
/// bound to the same cancellation token.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn_id = ConnectionIdFactory::generate();
    let (mut sink, stream) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();
    let conn = ConnectionHandle::new(conn_id, tx);
    let close = CancellationToken::new();

    tracing::info!(conn_id = %conn_id, "Client connected");

    let writer_close = close.clone();
    let writer = tokio::spawn(async move {
        write_frames(conn_id, &mut sink, rx, writer_close).await;
        close_sink(conn_id, &mut sink, CLOSE_TIMEOUT).await;
    });

    let heartbeat = spawn_heartbeat(conn.clone(), state.heartbeat.ping_interval, close.clone());

    let reason = Dispatcher::new(conn, state.repository.clone(), state.heartbeat.pong_wait)
        .run(stream, close.clone())
        .await;

    // the dispatcher cancels on return; the writer and heartbeat follow
    if let Err(e) = heartbeat.await {
        tracing::warn!(conn_id = %conn_id, error = %e, "Heartbeat task failed");
    }
    if let Err(e) = writer.await {
        tracing::warn!(conn_id = %conn_id, error = %e, "Writer task failed");
    }

    tracing::info!(conn_id = %conn_id, reason = ?reason, "Client disconnected");
}
