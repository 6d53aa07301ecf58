//! Hiroba room coordinator server.
//!
//! Participants connect to `ws://<host>:<port>/parties/<room>` and share their designs
//! with everyone else in the room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --evict-empty-rooms
//! ```

use std::sync::Arc;

use clap::Parser;
use hiroba_server::{
    app::build_app_state,
    config::{Args, ServerConfig},
    ui::Server,
};
use hiroba_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    let config = ServerConfig::from(&args);
    tracing::debug!("Starting with {:?}", config);

    let app_state = build_app_state(&config, Arc::new(SystemClock));
    let server = Server::new(app_state);
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
