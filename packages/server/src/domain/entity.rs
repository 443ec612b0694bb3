//! Core domain models for the broadcast hub.

use tokio::sync::mpsc::UnboundedSender;

use super::{
    error::DeliveryError,
    value_object::{ConnectionId, RoomName},
};

/// A frame queued for a connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundFrame {
    /// Plain text: a notice or forwarded message content
    Text(String),
    /// Heartbeat ping
    Ping,
}

/// Handle to one client connection.
///
/// Cloning a handle does not create a new connection; clones compare equal
/// and share the same outbound queue.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: UnboundedSender<OutboundFrame>,
}

impl ConnectionHandle {
    /// Create a handle from a connection id and the sending half of its outbound queue
    pub fn new(id: ConnectionId, sender: UnboundedSender<OutboundFrame>) -> Self {
        Self { id, sender }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue a text frame.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConnectionClosed` if the writer task has stopped
    pub fn send_text(&self, text: impl Into<String>) -> Result<(), DeliveryError> {
        self.send(OutboundFrame::Text(text.into()))
    }

    /// Queue a heartbeat ping.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::ConnectionClosed` if the writer task has stopped
    pub fn send_ping(&self) -> Result<(), DeliveryError> {
        self.send(OutboundFrame::Ping)
    }

    /// Whether the writer task has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    fn send(&self, frame: OutboundFrame) -> Result<(), DeliveryError> {
        self.sender
            .send(frame)
            .map_err(|_| DeliveryError::ConnectionClosed(self.id))
    }
}

impl PartialEq for ConnectionHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ConnectionHandle {}

/// A named group of connections, members kept in join order
#[derive(Debug, Clone)]
pub struct Room {
    /// Room name
    pub name: RoomName,
    members: Vec<ConnectionHandle>,
}

impl Room {
    /// Create a new room without members
    pub fn new(name: RoomName) -> Self {
        Self {
            name,
            members: Vec::new(),
        }
    }

    /// Add a member unless it is already present.
    ///
    /// Returns `true` if the member was added.
    pub fn join(&mut self, conn: ConnectionHandle) -> bool {
        if self.contains(&conn.id()) {
            return false;
        }
        self.members.push(conn);
        true
    }

    /// Remove a member by connection id.
    ///
    /// Returns `true` if the member was present.
    pub fn leave(&mut self, conn_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| &member.id() != conn_id);
        self.members.len() != before
    }

    pub fn contains(&self, conn_id: &ConnectionId) -> bool {
        self.members.iter().any(|member| &member.id() == conn_id)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Cloned member handles in join order
    pub fn snapshot(&self) -> Vec<ConnectionHandle> {
        self.members.clone()
    }
}
