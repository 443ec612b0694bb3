//! Server bootstrap: router, listener and graceful shutdown.

use std::{io, sync::Arc};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::{ConfigError, ServerConfig},
    infrastructure::repository::InMemoryRoomRepository,
    ui::{
        handler::{health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] io::Error),
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until a shutdown signal arrives.
///
/// The room registry lives exactly as long as this call.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    config.heartbeat.validate()?;

    let addr = config.addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let state = Arc::new(AppState::new(
        Arc::new(InMemoryRoomRepository::new()),
        config.heartbeat,
    ));
    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on {}", addr);
    }
    tracing::info!(
        ping_interval = ?state.heartbeat.ping_interval,
        pong_wait = ?state.heartbeat.pong_wait,
        "Heartbeat configured"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}
