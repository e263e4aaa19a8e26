//! Data transfer objects for the external interfaces.

pub mod websocket;
