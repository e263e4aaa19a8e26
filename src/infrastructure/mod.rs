//! Infrastructure layer: wire DTOs, the file-backed board store and the
//! activity log.

pub mod audit;
pub mod dto;
pub mod repository;

pub use audit::FileAuditLog;
pub use repository::FileBoardRepository;
