//! Server state, connection bookkeeping and broadcast fan-out.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::{mpsc, Mutex};

use crate::domain::{AlertState, AuditSink, BoardRepository, ConnectionId, SessionRegistry};
use crate::infrastructure::dto::websocket::ServerMessage;

/// Client connection information
pub struct ClientInfo {
    /// Outbound frame channel, pumped to the socket by the send task
    pub sender: mpsc::UnboundedSender<String>,
}

/// Shared application state, injected into every handler.
pub struct AppState {
    /// Board store (data access abstraction)
    pub repository: Arc<dyn BoardRepository>,
    /// Joined sessions keyed by user id
    pub registry: Arc<Mutex<SessionRegistry>>,
    /// Process-wide alert banner
    pub alert: Arc<Mutex<AlertState>>,
    /// Append-only activity log
    pub audit: Arc<dyn AuditSink>,
    /// Outbound channels of every open connection, joined or not
    pub connected_clients: Arc<Mutex<HashMap<ConnectionId, ClientInfo>>>,
    /// Held across one whole inbound message (apply, persist, broadcast,
    /// audit), reproducing single-event-loop atomicity on a multi-threaded
    /// runtime.
    pub handler_gate: Mutex<()>,
}

impl AppState {
    pub fn new(repository: Arc<dyn BoardRepository>, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            repository,
            registry: Arc::new(Mutex::new(SessionRegistry::new())),
            alert: Arc::new(Mutex::new(AlertState::new())),
            audit,
            connected_clients: Arc::new(Mutex::new(HashMap::new())),
            handler_gate: Mutex::new(()),
        }
    }

    /// Deliver an event to every open connection, the originator included.
    ///
    /// Serialized once. A connection whose channel has closed is skipped,
    /// never queued or retried; the disconnect path cleans it up.
    pub async fn broadcast(&self, message: &ServerMessage) {
        let json = serde_json::to_string(message).unwrap();
        let clients = self.connected_clients.lock().await;
        for (connection, client) in clients.iter() {
            if client.sender.send(json.clone()).is_err() {
                tracing::debug!("Skipping closed connection {connection}");
            }
        }
    }

    /// Reply to a single connection.
    pub async fn send_to(&self, connection: ConnectionId, message: &ServerMessage) {
        let json = serde_json::to_string(message).unwrap();
        let clients = self.connected_clients.lock().await;
        if let Some(client) = clients.get(&connection) {
            if client.sender.send(json).is_err() {
                tracing::debug!("Reply to closed connection {connection} dropped");
            }
        }
    }
}
