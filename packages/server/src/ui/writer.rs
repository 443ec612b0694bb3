//! Outbound writer: drains a connection's queue into the socket sink.

use std::{fmt::Display, time::Duration};

use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use crate::domain::{ConnectionId, OutboundFrame};

impl From<OutboundFrame> for Message {
    fn from(frame: OutboundFrame) -> Self {
        match frame {
            OutboundFrame::Text(text) => Message::Text(text.into()),
            OutboundFrame::Ping => Message::Ping(Default::default()),
        }
    }
}

/// Forward queued frames to `sink` until the queue closes, a send fails,
/// or `close` is cancelled.
///
/// A send still pending when `close` is cancelled is abandoned, so a peer
/// that stopped reading cannot hold the writer open. A failed send cancels
/// `close` so the rest of the connection shuts down with it.
///
/// Returning drops the queue receiver, so later sends to this connection
/// fail with `DeliveryError::ConnectionClosed`.
pub async fn write_frames<S>(
    conn_id: ConnectionId,
    sink: &mut S,
    mut rx: UnboundedReceiver<OutboundFrame>,
    close: CancellationToken,
) where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    loop {
        let frame = tokio::select! {
            _ = close.cancelled() => break,
            frame = rx.recv() => frame,
        };
        let Some(frame) = frame else { break };

        let sent = tokio::select! {
            _ = close.cancelled() => {
                tracing::debug!(conn_id = %conn_id, "Pending send abandoned on close");
                break;
            }
            sent = sink.send(frame.into()) => sent,
        };
        if let Err(e) = sent {
            tracing::warn!(conn_id = %conn_id, error = %e, "WebSocket send failed, closing connection");
            close.cancel();
            break;
        }
    }
}

/// Send a close frame, giving up after `timeout`.
pub async fn close_sink<S>(conn_id: ConnectionId, sink: &mut S, timeout: Duration)
where
    S: Sink<Message> + Unpin,
    S::Error: Display,
{
    match tokio::time::timeout(timeout, sink.close()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket close failed"),
        Err(_) => tracing::debug!(conn_id = %conn_id, "WebSocket close timed out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionIdFactory;
    use std::{
        pin::Pin,
        task::{Context, Poll},
    };
    use tokio::sync::mpsc;

    /// A sink whose peer never reads: every send stays pending
    struct StalledSink;

    impl Sink<Message> for StalledSink {
        type Error = String;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Pending
        }

        fn start_send(self: Pin<&mut Self>, _item: Message) -> Result<(), String> {
            Ok(())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Pending
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Pending
        }
    }

    /// A sink whose socket is already broken
    struct BrokenSink;

    impl Sink<Message> for BrokenSink {
        type Error = String;

        fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Ready(Err("broken pipe".to_string()))
        }

        fn start_send(self: Pin<&mut Self>, _item: Message) -> Result<(), String> {
            Err("broken pipe".to_string())
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Ready(Err("broken pipe".to_string()))
        }

        fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), String>> {
            Poll::Ready(Err("broken pipe".to_string()))
        }
    }

    #[tokio::test]
    async fn test_write_frames_forwards_in_order() {
        // テスト項目: キューに積まれた順にソケットへ書き込まれる
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let mut sink: Vec<Message> = Vec::new();
        tx.send(OutboundFrame::Text("one".to_string())).unwrap();
        tx.send(OutboundFrame::Ping).unwrap();
        tx.send(OutboundFrame::Text("two".to_string())).unwrap();
        drop(tx);

        // when (操作):
        write_frames(
            ConnectionIdFactory::generate(),
            &mut sink,
            rx,
            CancellationToken::new(),
        )
        .await;

        // then (期待する結果):
        assert_eq!(
            sink,
            vec![
                Message::Text("one".into()),
                Message::Ping(Default::default()),
                Message::Text("two".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_write_frames_stops_on_cancel() {
        // テスト項目: キャンセルされると送信を止めて受信側を閉じる
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        let close = CancellationToken::new();
        let writer_close = close.clone();
        let handle = tokio::spawn(async move {
            let mut sink: Vec<Message> = Vec::new();
            write_frames(ConnectionIdFactory::generate(), &mut sink, rx, writer_close).await;
        });

        // when (操作):
        close.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        assert!(tx.send(OutboundFrame::Ping).is_err());
    }

    #[tokio::test]
    async fn test_write_frames_abandons_stalled_send_on_cancel() {
        // テスト項目: 相手が読まずに送信が詰まっていても、キャンセルされれば writer は終了する
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(OutboundFrame::Text("stuck".to_string())).unwrap();
        let close = CancellationToken::new();
        let writer_close = close.clone();
        let handle = tokio::spawn(async move {
            let mut sink = StalledSink;
            write_frames(ConnectionIdFactory::generate(), &mut sink, rx, writer_close).await;
        });

        // when (操作):
        tokio::time::sleep(Duration::from_millis(50)).await;
        close.cancel();
        let result = tokio::time::timeout(Duration::from_secs(2), handle).await;

        // then (期待する結果):
        assert!(result.is_ok(), "writer still blocked after close was cancelled");
        assert!(tx.send(OutboundFrame::Ping).is_err());
    }

    #[tokio::test]
    async fn test_send_failure_cancels_connection() {
        // テスト項目: ソケットへの書き込みに失敗したら接続全体をクローズする
        // given (前提条件):
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(OutboundFrame::Ping).unwrap();
        let close = CancellationToken::new();
        let mut sink = BrokenSink;

        // when (操作):
        tokio::time::timeout(
            Duration::from_secs(1),
            write_frames(ConnectionIdFactory::generate(), &mut sink, rx, close.clone()),
        )
        .await
        .unwrap();

        // then (期待する結果):
        assert!(close.is_cancelled());
        assert!(tx.send(OutboundFrame::Ping).is_err());
    }

    #[tokio::test]
    async fn test_close_sink_gives_up_on_stalled_socket() {
        // テスト項目: close フレームが送れないソケットでも期限で諦める
        // given (前提条件):
        let mut sink = StalledSink;

        // when (操作):
        let result = tokio::time::timeout(
            Duration::from_secs(2),
            close_sink(
                ConnectionIdFactory::generate(),
                &mut sink,
                Duration::from_millis(50),
            ),
        )
        .await;

        // then (期待する結果):
        assert!(result.is_ok());
    }
}
