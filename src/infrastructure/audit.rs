//! Append-only activity log.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::domain::{AuditAction, AuditSink};
use crate::time::utc_now_rfc3339;

/// File-backed audit sink.
///
/// One line per accepted action:
/// `[2025-01-01T12:00:00.000Z] MOVE | User: Анна | ...`
/// Lines are appended, never rotated or truncated. Each line is also echoed
/// at info level.
pub struct FileAuditLog {
    path: PathBuf,
    // Serializes appends so concurrent lines never interleave mid-write.
    lock: Mutex<()>,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl AuditSink for FileAuditLog {
    fn append(&self, action: AuditAction, user: &str, details: &str) {
        let timestamp = utc_now_rfc3339();
        let line = format!("[{timestamp}] {action} | User: {user} | {details}");

        tracing::info!("{line}");
        if let Err(e) = self.append_line(&line) {
            tracing::error!("Failed to write audit log entry: {e}");
        }
    }
}
