//! Domain layer for the kanban board server.
//!
//! Business state and the traits the rest of the crate depends on,
//! independent of transport and storage concerns.

pub mod alert;
pub mod audit;
pub mod entity;
pub mod repository;
pub mod session;
pub mod value_object;

pub use alert::AlertState;
pub use audit::{AuditAction, AuditSink};
pub use entity::{Board, Card, Column};
pub use repository::{BoardRepository, RepositoryError};
pub use session::{ConnectionId, Session, SessionRegistry, UserProfile};
pub use value_object::{CardId, ColumnId};

#[cfg(test)]
pub use audit::MockAuditSink;
