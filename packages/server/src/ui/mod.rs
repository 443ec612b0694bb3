//! WebSocket broadcast server implementation.

pub mod dispatcher;
mod handler;
pub mod heartbeat;
mod runner;
mod signal;
pub mod state;
pub mod writer;

pub use runner::{ServerError, build_router, run, serve};
