//! Connected-user sessions and the in-memory session registry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Server-assigned identifier for one WebSocket connection.
///
/// Distinct from the client-supplied user id: the same user id can reconnect
/// on a new connection, and a connection can close before ever joining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identity as supplied by the client on `user_joined`.
///
/// The server trusts all three fields; `id` is the registry key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A connected client's identity binding plus its live connection.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub connection: ConnectionId,
}

/// Registry of joined sessions, keyed by client-supplied user id.
///
/// Purely in-memory; never persisted. A `user_joined` with an id already in
/// the registry overwrites the existing entry (last-write-wins).
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<String, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the session for its user id.
    pub fn add(&mut self, session: Session) {
        self.sessions.insert(session.user.id.clone(), session);
    }

    /// Remove and return the session bound to a connection, if any.
    ///
    /// Linear scan; a connection that closed before joining has no session.
    pub fn remove_by_connection(&mut self, connection: ConnectionId) -> Option<Session> {
        let user_id = self
            .sessions
            .iter()
            .find(|(_, s)| s.connection == connection)
            .map(|(id, _)| id.clone())?;
        self.sessions.remove(&user_id)
    }

    /// Look up a joined user's display name by user id.
    pub fn name_of(&self, user_id: &str) -> Option<&str> {
        self.sessions.get(user_id).map(|s| s.user.name.as_str())
    }

    /// All sessions with connection handles stripped, keyed by user id.
    pub fn sanitized_list(&self) -> HashMap<String, UserProfile> {
        self.sessions
            .iter()
            .map(|(id, s)| (id.clone(), s.user.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
