//! Real-time kanban board synchronization server.
//!
//! Clients connect over WebSocket, send typed JSON mutations, and every
//! accepted mutation is applied to the shared board, persisted to a JSON
//! snapshot, broadcast to all open connections and appended to an
//! append-only activity log.

pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use ui::{run_server, ServerConfig};
