//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

pub use http::{board_state, health_check};
pub use websocket::websocket_handler;
