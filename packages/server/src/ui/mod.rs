//! UI layer: HTTP and WebSocket endpoints.

pub mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
