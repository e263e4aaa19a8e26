//! WebSocket message DTOs.
//!
//! One inbound frame = one JSON object tagged by `type`. Both directions use
//! closed tagged unions; a frame whose `type` is not listed here simply fails
//! to deserialize and is ignored by the router.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{Board, Card, CardId, ColumnId, UserProfile};

/// Client → server messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    UserJoined {
        user: UserProfile,
    },
    GetBoard,
    #[serde(rename_all = "camelCase")]
    CardMoved {
        user_id: Option<String>,
        card_id: CardId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
    },
    #[serde(rename_all = "camelCase")]
    CardCreated {
        user_id: Option<String>,
        column_id: ColumnId,
        card: Card,
    },
    #[serde(rename_all = "camelCase")]
    CardUpdated {
        user_id: Option<String>,
        column_id: ColumnId,
        card: Card,
    },
    #[serde(rename_all = "camelCase")]
    CardDeleted {
        user_id: Option<String>,
        column_id: ColumnId,
        card_id: CardId,
    },
    #[serde(rename_all = "camelCase")]
    CardReordered {
        user_id: Option<String>,
        column_id: ColumnId,
        cards: Vec<Card>,
    },
    #[serde(rename_all = "camelCase")]
    AlertCreated {
        user_id: Option<String>,
        alert_text: String,
    },
    #[serde(rename_all = "camelCase")]
    AlertCleared {
        user_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ResetBoard {
        user_id: Option<String>,
    },
}

/// Server → client events. Mutation echoes mirror the triggering request.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    BoardData {
        data: Board,
    },
    UserJoined {
        user: UserProfile,
    },
    UsersList {
        users: HashMap<String, UserProfile>,
    },
    #[serde(rename_all = "camelCase")]
    UserLeft {
        user_id: String,
    },
    #[serde(rename_all = "camelCase")]
    CardMoved {
        user_id: Option<String>,
        card_id: CardId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
    },
    #[serde(rename_all = "camelCase")]
    CardCreated {
        user_id: Option<String>,
        column_id: ColumnId,
        card: Card,
    },
    #[serde(rename_all = "camelCase")]
    CardUpdated {
        user_id: Option<String>,
        column_id: ColumnId,
        card: Card,
    },
    #[serde(rename_all = "camelCase")]
    CardDeleted {
        user_id: Option<String>,
        column_id: ColumnId,
        card_id: CardId,
    },
    #[serde(rename_all = "camelCase")]
    CardReordered {
        user_id: Option<String>,
        column_id: ColumnId,
        cards: Vec<Card>,
    },
    #[serde(rename_all = "camelCase")]
    AlertCreated {
        alert_text: String,
    },
    AlertCleared,
}
