//! Room broadcast server.
//!
//! Clients connect to `/ws`, join rooms and exchange messages with every
//! member of the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server -- --port 8080
//! ```

use std::time::Duration;

use clap::Parser;
use roomcast_server::{HeartbeatConfig, ServerConfig};
use roomcast_shared::setup_logger;

/// Room broadcast server over WebSocket
#[derive(Parser, Debug)]
#[command(name = "roomcast-server", version, about)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Seconds between heartbeat pings
    #[arg(long, default_value_t = 10)]
    ping_interval_secs: u64,

    /// Seconds to wait for a pong before closing a connection
    #[arg(long, default_value_t = 15)]
    pong_wait_secs: u64,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            heartbeat: HeartbeatConfig {
                ping_interval: Duration::from_secs(args.ping_interval_secs),
                pong_wait: Duration::from_secs(args.pong_wait_secs),
            },
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = roomcast_server::run(args.into()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
