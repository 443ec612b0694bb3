//! Server state shared by all connections.

use std::sync::Arc;

use crate::{config::HeartbeatConfig, domain::RoomRepository};

/// Shared application state
///
/// Created when the server starts and dropped when it shuts down.
pub struct AppState {
    /// Repository（データアクセス層の抽象化）
    pub repository: Arc<dyn RoomRepository>,
    /// Liveness monitor timings applied to every connection
    pub heartbeat: HeartbeatConfig,
}

impl AppState {
    pub fn new(repository: Arc<dyn RoomRepository>, heartbeat: HeartbeatConfig) -> Self {
        Self {
            repository,
            heartbeat,
        }
    }
}
