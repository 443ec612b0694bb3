//! Liveness monitor.
//!
//! Sends a ping every `ping_interval`. The matching pong is observed by the
//! dispatcher, which owns the read deadline. When a ping can no longer be
//! queued the connection is force-closed through its cancellation token.

use std::time::Duration;

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::domain::ConnectionHandle;

/// Spawn the heartbeat task for one connection.
///
/// The task stops as soon as `close` is cancelled, whoever cancels it.
pub fn spawn_heartbeat(
    conn: ConnectionHandle,
    ping_interval: Duration,
    close: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(run_heartbeat(conn, ping_interval, close))
}

async fn run_heartbeat(conn: ConnectionHandle, ping_interval: Duration, close: CancellationToken) {
    let mut ticker = tokio::time::interval(ping_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Skip the first immediate tick
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = close.cancelled() => break,
            _ = ticker.tick() => {
                if let Err(e) = conn.send_ping() {
                    tracing::warn!(conn_id = %conn.id(), error = %e, "Ping failed, closing connection");
                    close.cancel();
                    break;
                }
                tracing::trace!(conn_id = %conn.id(), "Ping queued");
            }
        }
    }

    tracing::debug!(conn_id = %conn.id(), "Heartbeat stopped");
}
