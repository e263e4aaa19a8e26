//! Core domain models for the kanban board.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::value_object::{CardId, ColumnId};

/// A unit of work moving through the board.
///
/// The server only interprets `id` and `title`; everything else a client
/// attaches to a card is carried in `extra` and round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Create a card with no extra payload.
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// A named stage in the workflow holding an ordered list of cards.
///
/// `wip_limit` is advisory only; the server never rejects a move that
/// exceeds it. `collapsed` is presentation state with no behavioral effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub wip_limit: Option<u32>,
    pub cards: Vec<Card>,
    pub collapsed: bool,
}

impl Column {
    /// Create an empty column for the default template.
    fn template(id: i64, title: &str, wip_limit: Option<u32>) -> Self {
        Self {
            id: ColumnId(id),
            title: title.to_string(),
            wip_limit,
            cards: Vec::new(),
            collapsed: false,
        }
    }
}

/// The full board: an ordered sequence of columns.
///
/// Invariant maintained by the mutation methods: a card id appears at most
/// once across the entire board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    /// The fixed default board: the 21-column production workflow, with the
    /// intake («Заказы») and warehouse («Склад») columns unlimited.
    pub fn default_template() -> Self {
        Self {
            columns: vec![
                Column::template(1, "Заказы", None),
                Column::template(2, "Печать KBA", Some(3)),
                Column::template(3, "Печать Roland", Some(3)),
                Column::template(4, "Тиснение", Some(2)),
                Column::template(5, "УФ", Some(2)),
                Column::template(6, "Ламинация", Some(2)),
                Column::template(7, "Кашировка", Some(2)),
                Column::template(8, "Резка", Some(3)),
                Column::template(9, "Конгрев", Some(2)),
                Column::template(10, "Высечка", Some(2)),
                Column::template(11, "Вырубка БРАУЗ", Some(2)),
                Column::template(12, "Вырубка ЦЕНТУРИОН", Some(2)),
                Column::template(13, "Выборка", Some(2)),
                Column::template(14, "Пленка", Some(2)),
                Column::template(15, "Окошки", Some(2)),
                Column::template(16, "Склейка", Some(3)),
                Column::template(17, "Сверловка", Some(2)),
                Column::template(18, "Брошюровка", Some(2)),
                Column::template(19, "Подрезка", Some(3)),
                Column::template(20, "Упаковка", Some(4)),
                Column::template(21, "Склад", None),
            ],
        }
    }

    /// Get a column by id.
    pub fn column(&self, column_id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    fn column_mut(&mut self, column_id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Find the column currently holding a card, searching the whole board.
    pub fn column_holding(&self, card_id: &CardId) -> Option<&Column> {
        self.columns
            .iter()
            .find(|col| col.cards.iter().any(|c| &c.id == card_id))
    }

    /// Get a card anywhere on the board by id.
    pub fn card(&self, card_id: &CardId) -> Option<&Card> {
        self.columns
            .iter()
            .flat_map(|col| col.cards.iter())
            .find(|c| &c.id == card_id)
    }

    /// Total number of cards across all columns.
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.cards.len()).sum()
    }

    /// Move a card to the end of the target column.
    ///
    /// The true source column is re-derived by scanning the board; the
    /// caller's claimed source is never trusted. Returns whether a
    /// structural change occurred. No-ops when the card is missing, already
    /// sits in the target column, or the target column does not exist.
    pub fn move_card(&mut self, card_id: &CardId, to_column_id: ColumnId) -> bool {
        let source_idx = match self
            .columns
            .iter()
            .position(|col| col.cards.iter().any(|c| &c.id == card_id))
        {
            Some(idx) => idx,
            None => return false,
        };
        if self.columns[source_idx].id == to_column_id {
            return false;
        }
        let target_idx = match self.columns.iter().position(|c| c.id == to_column_id) {
            Some(idx) => idx,
            None => return false,
        };

        let source = &mut self.columns[source_idx];
        let card_idx = match source.cards.iter().position(|c| &c.id == card_id) {
            Some(idx) => idx,
            None => return false,
        };
        let card = source.cards.remove(card_idx);
        self.columns[target_idx].cards.push(card);
        true
    }

    /// Append a card to the named column. No-op if the column is unknown.
    pub fn create_card(&mut self, column_id: ColumnId, card: Card) -> bool {
        match self.column_mut(column_id) {
            Some(col) => {
                col.cards.push(card);
                true
            }
            None => false,
        }
    }

    /// Replace the card with a matching id within the named column,
    /// preserving its position. No-op if the column or card is unknown.
    pub fn update_card(&mut self, column_id: ColumnId, card: Card) -> bool {
        let col = match self.column_mut(column_id) {
            Some(col) => col,
            None => return false,
        };
        match col.cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                true
            }
            None => false,
        }
    }

    /// Remove the matching card from the named column. No-op if not found.
    pub fn delete_card(&mut self, column_id: ColumnId, card_id: &CardId) -> bool {
        let col = match self.column_mut(column_id) {
            Some(col) => col,
            None => return false,
        };
        match col.cards.iter().position(|c| &c.id == card_id) {
            Some(idx) => {
                col.cards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replace the column's card sequence wholesale with the client-supplied
    /// ordering. The sequence is trusted as-is. No-op if the column is
    /// unknown.
    pub fn reorder_cards(&mut self, column_id: ColumnId, cards: Vec<Card>) -> bool {
        match self.column_mut(column_id) {
            Some(col) => {
                col.cards = cards;
                true
            }
            None => false,
        }
    }
}
