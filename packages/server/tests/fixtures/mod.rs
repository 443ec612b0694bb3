//! Test fixtures: in-process server and WebSocket client helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use roomcast_server::{
    HeartbeatConfig,
    domain::{RoomName, RoomRepository},
    infrastructure::repository::InMemoryRoomRepository,
    ui::state::AppState,
};
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

pub type WsClient = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Server running on an ephemeral port for the duration of a test
pub struct TestServer {
    addr: SocketAddr,
    pub repository: Arc<InMemoryRoomRepository>,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(HeartbeatConfig::default()).await
    }

    pub async fn start_with(heartbeat: HeartbeatConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        let repository = Arc::new(InMemoryRoomRepository::new());
        let state = Arc::new(AppState::new(repository.clone(), heartbeat));

        let handle = tokio::spawn(async move {
            roomcast_server::serve(listener, state)
                .await
                .expect("Server failed");
        });

        Self {
            addr,
            repository,
            handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsClient {
        let (ws, _) = tokio_tungstenite::connect_async(self.ws_url())
            .await
            .expect("Failed to connect WebSocket");
        ws
    }

    pub async fn member_count(&self, room: &str) -> usize {
        self.repository.members(&room_name(room)).await.len()
    }

    pub async fn room_count(&self) -> usize {
        self.repository.room_count().await
    }

    pub async fn room_exists(&self, room: &str) -> bool {
        self.repository.room_exists(&room_name(room)).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Poll `condition` until it holds or the receive timeout elapses
pub async fn wait_until<F, Fut>(mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + RECV_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if condition().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

pub fn room_name(name: &str) -> RoomName {
    RoomName::new(name.to_string()).expect("Invalid room name")
}

pub async fn send_raw(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("Failed to send frame");
}

pub async fn join(ws: &mut WsClient, room: &str) {
    send_raw(ws, &serde_json::json!({"action": "join", "room": room}).to_string()).await;
}

pub async fn leave(ws: &mut WsClient, room: &str) {
    send_raw(ws, &serde_json::json!({"action": "leave", "room": room}).to_string()).await;
}

pub async fn say(ws: &mut WsClient, room: &str, content: &str) {
    send_raw(
        ws,
        &serde_json::json!({"action": "message", "room": room, "content": content}).to_string(),
    )
    .await;
}

/// Next text frame, skipping control frames. Panics on timeout or close.
pub async fn recv_text(ws: &mut WsClient) -> String {
    tokio::time::timeout(RECV_TIMEOUT, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return text.as_str().to_string(),
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                other => panic!("Expected text frame, got {other:?}"),
            }
        }
    })
    .await
    .expect("Timed out waiting for text frame")
}

/// Assert that no text frame arrives within `wait`
pub async fn assert_no_text(ws: &mut WsClient, wait: Duration) {
    let result = tokio::time::timeout(wait, async {
        loop {
            match ws.next().await {
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
                other => return other,
            }
        }
    })
    .await;

    if let Ok(frame) = result {
        panic!("Expected no frame, got {frame:?}");
    }
}
