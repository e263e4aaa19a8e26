//! File-backed board repository.
//!
//! The canonical board lives in memory behind a mutex; the durable form is a
//! single JSON snapshot slot overwritten after every applied mutation. The
//! snapshot write happens while the board lock is still held, so writes land
//! in exactly the order mutations are applied and a broadcast can never
//! outrun durable state. The write is deliberately a plain blocking one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AuditAction, AuditSink, Board, BoardRepository, Card, CardId, ColumnId, RepositoryError,
};

pub struct FileBoardRepository {
    board: Mutex<Board>,
    path: PathBuf,
    audit: Arc<dyn AuditSink>,
}

impl FileBoardRepository {
    /// Load the snapshot at `path`, falling back to the default template.
    ///
    /// A missing file is a normal fresh start. An unreadable or corrupt file
    /// is audited as a system error and also falls back; it is never fatal.
    pub fn load(path: impl Into<PathBuf>, audit: Arc<dyn AuditSink>) -> Self {
        let path = path.into();
        let board = match Self::read_snapshot(&path) {
            Ok(Some(board)) => {
                tracing::info!("Board data loaded from {}", path.display());
                board
            }
            Ok(None) => {
                tracing::info!("No snapshot at {}, starting from default board", path.display());
                Board::default_template()
            }
            Err(e) => {
                tracing::error!("Error loading board data: {e}");
                audit.append(AuditAction::Error, "system", &format!("Failed to load board data: {e}"));
                Board::default_template()
            }
        };
        Self {
            board: Mutex::new(board),
            path,
            audit,
        }
    }

    fn read_snapshot(path: &Path) -> Result<Option<Board>, RepositoryError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read_to_string(path)?;
        let board = serde_json::from_str(&data)?;
        Ok(Some(board))
    }

    /// Write the given board to the snapshot slot.
    ///
    /// Called with the board lock held. On failure the error is audited and
    /// swallowed; in-memory state is unaffected and there is no retry.
    fn persist_board(&self, board: &Board) {
        match self.write_snapshot(board) {
            Ok(()) => tracing::debug!("Board data saved to {}", self.path.display()),
            Err(e) => {
                tracing::error!("Error saving board data: {e}");
                self.audit.append(
                    AuditAction::Error,
                    "system",
                    &format!("Failed to save board data: {e}"),
                );
            }
        }
    }

    fn write_snapshot(&self, board: &Board) -> Result<(), RepositoryError> {
        let json = serde_json::to_string_pretty(board)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

#[async_trait]
impl BoardRepository for FileBoardRepository {
    async fn snapshot(&self) -> Board {
        self.board.lock().await.clone()
    }

    async fn move_card(&self, card_id: &CardId, to_column_id: ColumnId) -> bool {
        let mut board = self.board.lock().await;
        let applied = board.move_card(card_id, to_column_id);
        if applied {
            self.persist_board(&board);
        }
        applied
    }

    async fn create_card(&self, column_id: ColumnId, card: Card) -> bool {
        let mut board = self.board.lock().await;
        let applied = board.create_card(column_id, card);
        if applied {
            self.persist_board(&board);
        }
        applied
    }

    async fn update_card(&self, column_id: ColumnId, card: Card) -> bool {
        let mut board = self.board.lock().await;
        let applied = board.update_card(column_id, card);
        if applied {
            self.persist_board(&board);
        }
        applied
    }

    async fn delete_card(&self, column_id: ColumnId, card_id: &CardId) -> bool {
        let mut board = self.board.lock().await;
        let applied = board.delete_card(column_id, card_id);
        if applied {
            self.persist_board(&board);
        }
        applied
    }

    async fn reorder_cards(&self, column_id: ColumnId, cards: Vec<Card>) -> bool {
        let mut board = self.board.lock().await;
        let applied = board.reorder_cards(column_id, cards);
        if applied {
            self.persist_board(&board);
        }
        applied
    }

    async fn reset(&self) -> Board {
        let mut board = self.board.lock().await;
        *board = Board::default_template();
        self.persist_board(&board);
        board.clone()
    }

    async fn persist(&self) {
        let board = self.board.lock().await;
        self.persist_board(&board);
    }
}
