//! WebSocket message DTOs for the broadcast hub.
//!
//! Inbound frames are JSON envelopes. Outbound frames are plain text and have
//! no DTO.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{MessageContent, RoomName, ValueObjectError};

/// Action requested by an inbound envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Join,
    Leave,
    Message,
    /// Any other action value; ignored by the dispatcher
    #[serde(other)]
    Unknown,
}

/// Inbound envelope as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeDto {
    pub action: Action,
    #[serde(default)]
    pub room: String,
    /// Only meaningful for `message`
    #[serde(default)]
    pub content: String,
}

/// A validated inbound command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join(RoomName),
    Leave(RoomName),
    Message(RoomName, MessageContent),
    Unknown,
}

/// Errors raised while decoding an inbound frame
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("malformed envelope: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid envelope: {0}")]
    Invalid(#[from] ValueObjectError),
}

impl TryFrom<EnvelopeDto> for Command {
    type Error = EnvelopeError;

    fn try_from(dto: EnvelopeDto) -> Result<Self, Self::Error> {
        let command = match dto.action {
            Action::Join => Command::Join(RoomName::new(dto.room)?),
            Action::Leave => Command::Leave(RoomName::new(dto.room)?),
            Action::Message => {
                Command::Message(RoomName::new(dto.room)?, MessageContent::new(dto.content))
            }
            Action::Unknown => Command::Unknown,
        };
        Ok(command)
    }
}

/// Decode a text or binary frame payload into a command
pub fn decode_command(payload: &[u8]) -> Result<Command, EnvelopeError> {
    let dto: EnvelopeDto = serde_json::from_slice(payload)?;
    Command::try_from(dto)
}
