//! IRC protocol layer: connection transport, server message parsing, and
//! user command parsing.

pub mod commands;
pub mod connection;
pub mod message;
