//! UseCase: user join.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{
    AuditAction, AuditSink, ConnectionId, Session, SessionRegistry, UserProfile,
};

/// Registers a joining user's session and exposes the sanitized user list
/// for the `users_list` broadcast.
pub struct JoinUserUseCase {
    registry: Arc<Mutex<SessionRegistry>>,
    audit: Arc<dyn AuditSink>,
}

impl JoinUserUseCase {
    pub fn new(registry: Arc<Mutex<SessionRegistry>>, audit: Arc<dyn AuditSink>) -> Self {
        Self { registry, audit }
    }

    /// Register the session. A duplicate user id overwrites the previous
    /// entry; the server performs no uniqueness enforcement.
    pub async fn execute(&self, user: UserProfile, connection: ConnectionId) {
        let name = user.name.clone();
        self.registry.lock().await.add(Session { user, connection });
        self.audit
            .append(AuditAction::Connect, &name, "User connected");
    }

    /// All joined users with connection handles stripped.
    pub async fn users_list(&self) -> std::collections::HashMap<String, UserProfile> {
        self.registry.lock().await.sanitized_list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockAuditSink;

    fn profile(id: &str, name: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: name.to_string(),
            color: "#00aa55".to_string(),
        }
    }

    #[tokio::test]
    async fn test_join_registers_and_audits() {
        // given:
        let registry = Arc::new(Mutex::new(SessionRegistry::new()));
        let mut audit = MockAuditSink::new();
        audit
            .expect_append()
            .withf(|action, user, details| {
                *action == AuditAction::Connect && user == "Анна" && details == "User connected"
            })
            .times(1)
            .return_const(());
        let usecase = JoinUserUseCase::new(registry.clone(), Arc::new(audit));

        // when:
        usecase.execute(profile("u1", "Анна"), ConnectionId::generate()).await;

        // then:
        assert_eq!(registry.lock().await.len(), 1);
        let list = usecase.users_list().await;
        assert_eq!(list["u1"].name, "Анна");
    }

    #[tokio::test]
    async fn test_rejoin_same_id_overwrites() {
        // given: "u1" already joined
        let registry = Arc::new(Mutex::new(SessionRegistry::new()));
        let mut audit = MockAuditSink::new();
        audit.expect_append().times(2).return_const(());
        let usecase = JoinUserUseCase::new(registry.clone(), Arc::new(audit));
        usecase.execute(profile("u1", "Анна"), ConnectionId::generate()).await;

        // when: the same id joins from another connection
        usecase.execute(profile("u1", "Анна (планшет)"), ConnectionId::generate()).await;

        // then: last write wins
        let list = usecase.users_list().await;
        assert_eq!(list.len(), 1);
        assert_eq!(list["u1"].name, "Анна (планшет)");
    }
}
