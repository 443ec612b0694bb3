//! Room broadcast hub library.
//!
//! Clients connect over WebSocket, join named rooms, and every text message
//! sent to a room is fanned out to the room's current members.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{HeartbeatConfig, ServerConfig};
pub use ui::{run, serve};
