//! UseCase: global alert banner.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{AlertState, AuditAction, AuditSink};

/// Sets, clears and reads the process-wide alert.
pub struct AlertUseCase {
    alert: Arc<Mutex<AlertState>>,
    audit: Arc<dyn AuditSink>,
}

impl AlertUseCase {
    pub fn new(alert: Arc<Mutex<AlertState>>, audit: Arc<dyn AuditSink>) -> Self {
        Self { alert, audit }
    }

    pub async fn set(&self, user_name: &str, text: String) {
        self.audit.append(
            AuditAction::Alert,
            user_name,
            &format!("Created alert: \"{text}\""),
        );
        self.alert.lock().await.set(text);
    }

    pub async fn clear(&self, user_name: &str) {
        self.alert.lock().await.clear();
        self.audit
            .append(AuditAction::AlertClear, user_name, "Cleared the alert");
    }

    pub async fn current(&self) -> Option<String> {
        self.alert.lock().await.current().map(str::to_string)
    }
}
