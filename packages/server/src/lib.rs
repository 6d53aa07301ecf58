//! Hiroba room coordinator server.
//!
//! Participants join a named room over WebSocket, each owns one design, and every
//! participant sees the live roster and every design in the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// wiring
pub mod app;
pub mod config;
