//! Plain-text notices sent to room members on membership changes.

use crate::domain::RoomName;

pub fn joined(room: &RoomName) -> String {
    format!("someone joined {room}")
}

pub fn left(room: &RoomName) -> String {
    format!("someone left {room}")
}

pub fn disconnected() -> String {
    "someone disconnected".to_string()
}
