//! UseCase: board mutations.
//!
//! One accepted mutation = apply to the store (which persists before
//! returning) + one audit line. A mutation that does not change state
//! produces neither; the caller then skips the broadcast as well, so stale
//! references cost nothing and add no log noise.

use std::sync::Arc;

use crate::domain::{AuditAction, AuditSink, Board, BoardRepository, Card, CardId, ColumnId};

pub struct BoardMutationUseCase {
    repository: Arc<dyn BoardRepository>,
    audit: Arc<dyn AuditSink>,
}

impl BoardMutationUseCase {
    pub fn new(repository: Arc<dyn BoardRepository>, audit: Arc<dyn AuditSink>) -> Self {
        Self { repository, audit }
    }

    /// Full board snapshot, for `get_board` replies and join seeding.
    pub async fn board(&self) -> Board {
        self.repository.snapshot().await
    }

    /// Move a card to the target column. Audit details name the card and the
    /// true source column, looked up before the mutation.
    pub async fn move_card(
        &self,
        user_name: &str,
        card_id: &CardId,
        claimed_from: ColumnId,
        to_column_id: ColumnId,
    ) -> bool {
        let before = self.repository.snapshot().await;
        let card_title = before.card(card_id).map(|c| c.title.clone());
        let source_title = before.column_holding(card_id).map(|c| c.title.clone());
        let target_title = before.column(to_column_id).map(|c| c.title.clone());
        if before
            .column_holding(card_id)
            .map(|c| c.id != claimed_from)
            .unwrap_or(false)
        {
            tracing::debug!(
                "move request claims source column {claimed_from}, card is elsewhere"
            );
        }

        let applied = self.repository.move_card(card_id, to_column_id).await;
        if applied {
            self.audit.append(
                AuditAction::Move,
                user_name,
                &format!(
                    "Moved card \"{}\" from \"{}\" to \"{}\"",
                    card_title.unwrap_or_default(),
                    source_title.unwrap_or_default(),
                    target_title.unwrap_or_default(),
                ),
            );
        }
        applied
    }

    pub async fn create_card(&self, user_name: &str, column_id: ColumnId, card: Card) -> bool {
        let column_title = self.column_title(column_id).await;
        let card_title = card.title.clone();

        let applied = self.repository.create_card(column_id, card).await;
        if applied {
            self.audit.append(
                AuditAction::Create,
                user_name,
                &format!(
                    "Created card \"{card_title}\" in column \"{}\"",
                    column_title.unwrap_or_default()
                ),
            );
        }
        applied
    }

    pub async fn update_card(&self, user_name: &str, column_id: ColumnId, card: Card) -> bool {
        let column_title = self.column_title(column_id).await;
        let card_title = card.title.clone();

        let applied = self.repository.update_card(column_id, card).await;
        if applied {
            self.audit.append(
                AuditAction::Update,
                user_name,
                &format!(
                    "Updated card \"{card_title}\" in column \"{}\"",
                    column_title.unwrap_or_default()
                ),
            );
        }
        applied
    }

    /// Delete a card. The title for the audit line is looked up before the
    /// card disappears.
    pub async fn delete_card(&self, user_name: &str, column_id: ColumnId, card_id: &CardId) -> bool {
        let before = self.repository.snapshot().await;
        let card_title = before
            .column(column_id)
            .and_then(|col| col.cards.iter().find(|c| &c.id == card_id))
            .map(|c| c.title.clone());
        let column_title = before.column(column_id).map(|c| c.title.clone());

        let applied = self.repository.delete_card(column_id, card_id).await;
        if applied {
            self.audit.append(
                AuditAction::Delete,
                user_name,
                &format!(
                    "Deleted card \"{}\" from column \"{}\"",
                    card_title.unwrap_or_default(),
                    column_title.unwrap_or_default()
                ),
            );
        }
        applied
    }

    pub async fn reorder_cards(
        &self,
        user_name: &str,
        column_id: ColumnId,
        cards: Vec<Card>,
    ) -> bool {
        let column_title = self.column_title(column_id).await;

        let applied = self.repository.reorder_cards(column_id, cards).await;
        if applied {
            self.audit.append(
                AuditAction::Reorder,
                user_name,
                &format!(
                    "Reordered cards in column \"{}\"",
                    column_title.unwrap_or_default()
                ),
            );
        }
        applied
    }

    /// Replace the board with the default template and return the new board.
    pub async fn reset_board(&self, user_name: &str) -> Board {
        let board = self.repository.reset().await;
        self.audit.append(
            AuditAction::Reset,
            user_name,
            "Reset the board to its initial state",
        );
        board
    }

    async fn column_title(&self, column_id: ColumnId) -> Option<String> {
        self.repository
            .snapshot()
            .await
            .column(column_id)
            .map(|c| c.title.clone())
    }
}
