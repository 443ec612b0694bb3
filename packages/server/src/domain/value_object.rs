//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Connection identifier value object.
///
/// Generated by the server when a socket is handed to the hub and never
/// shown to clients. Two handles refer to the same connection iff their ids
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Room name value object.
///
/// The key of a room in the registry. Rooms have no other identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message content value object.
///
/// Forwarded to room members verbatim. Any text is accepted, including the
/// empty string; the transport's frame limit is the only bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent(String);

impl MessageContent {
    /// Create a new MessageContent.
    pub fn new(content: String) -> Self {
        Self(content)
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for MessageContent {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for MessageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_name_new_success() {
        // テスト項目: 有効なルーム名を作成できる
        // given (前提条件):
        let name = "lobby".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(result.unwrap().as_str(), "lobby");
    }

    #[test]
    fn test_room_name_new_empty_fails() {
        // テスト項目: 空のルーム名は作成できない
        // given (前提条件):
        let name = "".to_string();

        // when (操作):
        let result = RoomName::new(name);

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), ValueObjectError::RoomNameEmpty);
    }

    #[test]
    fn test_room_name_accepts_long_name() {
        // テスト項目: 長いルーム名にも上限はない
        // given (前提条件):
        let name = "a".repeat(1_000);

        // when (操作):
        let result = RoomName::new(name.clone());

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), name);
    }

    #[test]
    fn test_room_name_equality() {
        // テスト項目: 同じ値を持つ RoomName は等価
        // given (前提条件):
        let lobby1 = RoomName::new("lobby".to_string()).unwrap();
        let lobby2 = RoomName::new("lobby".to_string()).unwrap();
        let kitchen = RoomName::new("kitchen".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(lobby1, lobby2);
        assert_ne!(lobby1, kitchen);
    }

    #[test]
    fn test_message_content_allows_empty() {
        // テスト項目: 空のメッセージ内容はそのまま転送できる
        // when (操作):
        let content = MessageContent::new(String::new());

        // then (期待する結果):
        assert_eq!(content.as_str(), "");
    }

    #[test]
    fn test_message_content_keeps_large_text_verbatim() {
        // テスト項目: 大きなメッセージ内容も切り詰めずにそのまま保持される
        // given (前提条件):
        let text = "あ".repeat(20_000);

        // when (操作):
        let content = MessageContent::from(text.clone());

        // then (期待する結果):
        assert_eq!(content.into_string(), text);
    }

    #[test]
    fn test_connection_id_display_matches_uuid() {
        // テスト項目: ConnectionId の表示は内部の UUID と一致する
        // given (前提条件):
        let uuid = Uuid::new_v4();

        // when (操作):
        let id = ConnectionId::from_uuid(uuid);

        // then (期待する結果):
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(id.as_uuid(), &uuid);
    }
}
