//! Domain layer for the broadcast hub.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ConnectionHandle, OutboundFrame, Room};
pub use error::{DeliveryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
#[cfg(test)]
pub use repository::MockRoomRepository;
pub use repository::RoomRepository;
pub use value_object::{ConnectionId, MessageContent, RoomName};
