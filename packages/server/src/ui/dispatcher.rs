//! Per-connection receive loop.
//!
//! Decodes inbound envelopes and drives the room use cases. The loop ends on
//! a receive error, end of stream, a close frame, an expired read deadline or
//! a force-close from the heartbeat. Cleanup then runs exactly once.

use std::{fmt::Display, sync::Arc, time::Duration};

use axum::extract::ws::Message;
use futures_util::{Stream, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{
    domain::{ConnectionHandle, RoomRepository},
    infrastructure::dto::websocket::{Command, decode_command},
    usecase::{DisconnectConnectionUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase},
};

/// Why a receive loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The peer sent a close frame
    ClosedByPeer,
    /// The stream ended without a close frame
    StreamEnded,
    /// Reading from the stream failed
    ReceiveError,
    /// No pong arrived before the read deadline
    DeadlineExceeded,
    /// The heartbeat or the server closed the connection
    ForceClosed,
}

pub struct Dispatcher {
    conn: ConnectionHandle,
    pong_wait: Duration,
    join: JoinRoomUseCase,
    leave: LeaveRoomUseCase,
    send: SendMessageUseCase,
    disconnect: DisconnectConnectionUseCase,
}

impl Dispatcher {
    pub fn new(
        conn: ConnectionHandle,
        repository: Arc<dyn RoomRepository>,
        pong_wait: Duration,
    ) -> Self {
        Self {
            conn,
            pong_wait,
            join: JoinRoomUseCase::new(repository.clone()),
            leave: LeaveRoomUseCase::new(repository.clone()),
            send: SendMessageUseCase::new(repository.clone()),
            disconnect: DisconnectConnectionUseCase::new(repository),
        }
    }

    /// Run the receive loop until the connection ends, then clean up.
    ///
    /// `close` is cancelled on return so that the heartbeat and writer tasks
    /// bound to this connection stop as well.
    pub async fn run<S, E>(self, mut stream: S, close: CancellationToken) -> ExitReason
    where
        S: Stream<Item = Result<Message, E>> + Unpin,
        E: Display,
    {
        let conn_id = self.conn.id();
        let mut deadline = Instant::now() + self.pong_wait;

        let reason = loop {
            let next = tokio::select! {
                _ = close.cancelled() => break ExitReason::ForceClosed,
                _ = tokio::time::sleep_until(deadline) => break ExitReason::DeadlineExceeded,
                next = stream.next() => next,
            };

            let msg = match next {
                Some(Ok(msg)) => msg,
                Some(Err(e)) => {
                    tracing::warn!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                    break ExitReason::ReceiveError;
                }
                None => break ExitReason::StreamEnded,
            };

            match msg {
                Message::Text(text) => self.handle_payload(text.as_bytes()).await,
                Message::Binary(data) => self.handle_payload(&data).await,
                Message::Pong(_) => {
                    deadline = Instant::now() + self.pong_wait;
                    tracing::trace!(conn_id = %conn_id, "Pong received, read deadline extended");
                }
                Message::Ping(_) => {
                    tracing::trace!(conn_id = %conn_id, "Received ping");
                }
                Message::Close(frame) => {
                    tracing::debug!(conn_id = %conn_id, reason = ?frame, "Client requested close");
                    break ExitReason::ClosedByPeer;
                }
            }
        };

        match reason {
            ExitReason::DeadlineExceeded => {
                tracing::warn!(conn_id = %conn_id, "No pong before read deadline, closing connection");
            }
            _ => tracing::debug!(conn_id = %conn_id, reason = ?reason, "Receive loop stopped"),
        }

        self.disconnect.execute(&conn_id).await;
        close.cancel();
        reason
    }

    async fn handle_payload(&self, payload: &[u8]) {
        let command = match decode_command(payload) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(conn_id = %self.conn.id(), error = %e, "Failed to decode envelope");
                return;
            }
        };

        match command {
            Command::Join(room) => {
                self.join.execute(&room, self.conn.clone()).await;
            }
            Command::Leave(room) => {
                self.leave.execute(&room, &self.conn.id()).await;
            }
            Command::Message(room, content) => {
                self.send.execute(&room, &content).await;
            }
            Command::Unknown => {}
        }
    }
}
