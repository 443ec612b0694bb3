//! Shared utilities for Roomcast binaries.

pub mod logger;

pub use logger::setup_logger;
