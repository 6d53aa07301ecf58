//! Utilities shared between Hiroba packages.

pub mod logger;
pub mod time;
