//! UseCase: user disconnect.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{AuditAction, AuditSink, ConnectionId, Session, SessionRegistry};

/// Removes the session bound to a closed connection and reports who left.
pub struct DisconnectUserUseCase {
    registry: Arc<Mutex<SessionRegistry>>,
    audit: Arc<dyn AuditSink>,
}

impl DisconnectUserUseCase {
    pub fn new(registry: Arc<Mutex<SessionRegistry>>, audit: Arc<dyn AuditSink>) -> Self {
        Self { registry, audit }
    }

    /// Remove the session for a closed connection, if one was ever joined.
    ///
    /// Returns the removed session so the caller can broadcast `user_left`.
    /// A connection that closed before sending `user_joined` has no session
    /// and nothing is audited.
    pub async fn execute(&self, connection: ConnectionId) -> Option<Session> {
        let removed = self
            .registry
            .lock()
            .await
            .remove_by_connection(connection)?;
        self.audit.append(
            AuditAction::Disconnect,
            &removed.user.name,
            "User disconnected",
        );
        Some(removed)
    }
}
