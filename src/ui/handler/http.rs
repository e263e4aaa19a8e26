//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{domain::Board, ui::state::AppState};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint exposing the current board snapshot
pub async fn board_state(State(state): State<Arc<AppState>>) -> Json<Board> {
    Json(state.repository.snapshot().await)
}
