//! Board store abstraction.
//!
//! The usecase layer depends on this trait, not on the file-backed
//! implementation (dependency inversion).

use async_trait::async_trait;
use thiserror::Error;

use super::entity::{Board, Card};
use super::value_object::{CardId, ColumnId};

/// Errors from the durable snapshot slot.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Snapshot file could not be read or written
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot content was not a valid board
    #[error("snapshot is not a valid board: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The canonical board and its durable snapshot.
///
/// Every mutation returns whether it actually changed state so callers can
/// skip persistence, broadcast and audit on no-ops. An applied mutation has
/// already been persisted by the time the method returns, and mutation plus
/// persistence happen under one lock acquisition: snapshot writes occur in
/// exactly the order mutations are applied. Persistence failures are handled
/// internally (audited, state retained) and never surfaced to callers.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Full copy of the current board.
    async fn snapshot(&self) -> Board;

    /// Move a card to the end of the target column; the true source column
    /// is re-derived by scanning the board.
    async fn move_card(&self, card_id: &CardId, to_column_id: ColumnId) -> bool;

    /// Append a card to the named column.
    async fn create_card(&self, column_id: ColumnId, card: Card) -> bool;

    /// Replace the card with a matching id in the named column, in place.
    async fn update_card(&self, column_id: ColumnId, card: Card) -> bool;

    /// Remove the matching card from the named column.
    async fn delete_card(&self, column_id: ColumnId, card_id: &CardId) -> bool;

    /// Replace the column's card sequence wholesale (client-supplied order).
    async fn reorder_cards(&self, column_id: ColumnId, cards: Vec<Card>) -> bool;

    /// Replace the entire board with the default template and return it.
    async fn reset(&self) -> Board;

    /// Serialize the current board to the snapshot slot.
    async fn persist(&self);
}
