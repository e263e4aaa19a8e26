//! Audit log abstraction.
//!
//! The audit trail is an external collaborator: a write-only append target
//! the router calls after each accepted action. Failures stay on the server
//! side; nothing is ever reported back to clients.

use std::fmt;

#[cfg(test)]
use mockall::automock;

/// Action tag written at the start of every audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Start,
    Connect,
    Disconnect,
    Move,
    Create,
    Update,
    Delete,
    Reorder,
    Alert,
    AlertClear,
    Reset,
    Error,
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            AuditAction::Start => "START",
            AuditAction::Connect => "CONNECT",
            AuditAction::Disconnect => "DISCONNECT",
            AuditAction::Move => "MOVE",
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Reorder => "REORDER",
            AuditAction::Alert => "ALERT",
            AuditAction::AlertClear => "ALERT_CLEAR",
            AuditAction::Reset => "RESET",
            AuditAction::Error => "ERROR",
        };
        f.write_str(tag)
    }
}

/// Append-only audit sink.
///
/// One line per accepted action. Append failures must not propagate; the
/// sink logs them and the server keeps running.
#[cfg_attr(test, automock)]
pub trait AuditSink: Send + Sync {
    fn append(&self, action: AuditAction, user: &str, details: &str);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_tags_match_log_vocabulary() {
        // then: tags render exactly as they appear in activity.log
        assert_eq!(AuditAction::Move.to_string(), "MOVE");
        assert_eq!(AuditAction::AlertClear.to_string(), "ALERT_CLEAR");
        assert_eq!(AuditAction::Error.to_string(), "ERROR");
        assert_eq!(AuditAction::Start.to_string(), "START");
    }
}
