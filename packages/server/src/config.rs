//! Server configuration.
//!
//! Every flag can also be given as a `HIROBA_*` environment variable.

use std::time::Duration;

use clap::Parser;

/// Command line arguments of `hiroba-server`
#[derive(Parser, Debug, Clone)]
#[command(name = "hiroba-server")]
#[command(about = "Real-time collaborative design room server", long_about = None)]
pub struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HIROBA_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "HIROBA_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Interval between WebSocket pings in seconds (0 disables heartbeats)
    #[arg(long, env = "HIROBA_HEARTBEAT_INTERVAL_SECS", default_value_t = 30)]
    pub heartbeat_interval_secs: u64,

    /// Remove a room once its last participant leaves (discards its designs)
    #[arg(long, env = "HIROBA_EVICT_EMPTY_ROOMS", default_value_t = false)]
    pub evict_empty_rooms: bool,
}

/// Runtime configuration of the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` disables heartbeats
    pub heartbeat_interval: Option<Duration>,
    pub evict_empty_rooms: bool,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            heartbeat_interval: Some(Duration::from_secs(30)),
            evict_empty_rooms: false,
        }
    }
}

impl From<&Args> for ServerConfig {
    fn from(args: &Args) -> Self {
        Self {
            host: args.host.clone(),
            port: args.port,
            heartbeat_interval: (args.heartbeat_interval_secs > 0)
                .then(|| Duration::from_secs(args.heartbeat_interval_secs)),
            evict_empty_rooms: args.evict_empty_rooms,
        }
    }
}
