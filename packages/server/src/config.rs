//! Server configuration.

use std::time::Duration;

use thiserror::Error;

/// Default interval between heartbeat pings
pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(10);

/// Default read deadline, reset whenever a pong arrives
pub const DEFAULT_PONG_WAIT: Duration = Duration::from_secs(15);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ping interval must be greater than zero")]
    ZeroPingInterval,

    #[error("pong wait ({pong_wait:?}) must be longer than the ping interval ({ping_interval:?})")]
    PongWaitTooShort {
        ping_interval: Duration,
        pong_wait: Duration,
    },
}

/// Liveness monitor timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    pub ping_interval: Duration,
    pub pong_wait: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            ping_interval: DEFAULT_PING_INTERVAL,
            pong_wait: DEFAULT_PONG_WAIT,
        }
    }
}

impl HeartbeatConfig {
    /// A pong can only arrive after a ping, so the read deadline has to
    /// outlast at least one ping interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ping_interval.is_zero() {
            return Err(ConfigError::ZeroPingInterval);
        }
        if self.pong_wait <= self.ping_interval {
            return Err(ConfigError::PongWaitTooShort {
                ping_interval: self.ping_interval,
                pong_wait: self.pong_wait,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub heartbeat: HeartbeatConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            heartbeat: HeartbeatConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
