//! UI layer: WebSocket/HTTP endpoints and server assembly.

pub mod handler;
mod runner;
mod signal;
pub mod state;

pub use runner::{run_server, ServerConfig};
