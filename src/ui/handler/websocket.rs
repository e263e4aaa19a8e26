//! WebSocket connection lifecycle and the message router.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{AuditAction, ConnectionId},
    infrastructure::dto::websocket::{ClientMessage, ServerMessage},
    ui::state::{AppState, ClientInfo},
    usecase::{AlertUseCase, BoardMutationUseCase, DisconnectUserUseCase, JoinUserUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection = ConnectionId::generate();
    tracing::info!("New connection {connection}");

    // Create a channel for this client to receive fan-out frames
    let (tx, mut rx) = mpsc::unbounded_channel();
    state
        .connected_clients
        .lock()
        .await
        .insert(connection, ClientInfo { sender: tx });

    replay_alert(&state, connection).await;

    let (mut sender, mut receiver) = socket.split();

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on {connection}: {e}");
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_message(&state_clone, connection, &text).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection {connection} requested close");
                    break;
                }
                _ => {}
            }
        }
    });

    // Pump fan-out frames to this client's socket
    let mut send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    });

    // If either task completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    close_connection(&state, connection).await;
}

/// Push the active alert to a fresh connection, if one is set.
///
/// Goes through the same channel as broadcasts, so it arrives before
/// anything triggered by the client's own messages. Runs under the handler
/// gate: the read and the send must not straddle a concurrent
/// `alert_cleared`, or the newcomer would end up showing a stale alert.
async fn replay_alert(state: &Arc<AppState>, connection: ConnectionId) {
    let _gate = state.handler_gate.lock().await;
    let alert = AlertUseCase::new(state.alert.clone(), state.audit.clone());
    if let Some(alert_text) = alert.current().await {
        state
            .send_to(connection, &ServerMessage::AlertCreated { alert_text })
            .await;
    }
}

/// Tear down a closed connection and tell everyone who left.
///
/// Removal from the fan-out map, session removal and the `user_left`
/// broadcast happen as one gated step, so they never interleave with an
/// in-flight message's broadcasts (a concurrent `users_list` must observe
/// the registry either wholly before or wholly after the departure).
async fn close_connection(state: &Arc<AppState>, connection: ConnectionId) {
    let _gate = state.handler_gate.lock().await;
    state.connected_clients.lock().await.remove(&connection);

    let disconnect = DisconnectUserUseCase::new(state.registry.clone(), state.audit.clone());
    if let Some(session) = disconnect.execute(connection).await {
        tracing::info!("User '{}' disconnected", session.user.name);
        state
            .broadcast(&ServerMessage::UserLeft {
                user_id: session.user.id,
            })
            .await;
    } else {
        tracing::debug!("Connection {connection} closed before joining");
    }
}

/// Route one inbound frame.
///
/// Two-stage parse: a frame that is not valid JSON is audited as an error
/// attributed to "unknown" and otherwise ignored (the connection stays
/// open, nothing is sent back); valid JSON with an unrecognized `type` is
/// dropped silently. Accepted messages are handled under the handler gate,
/// so apply, persist, broadcast and audit of one message never interleave
/// with another's.
async fn handle_message(state: &Arc<AppState>, connection: ConnectionId, text: &str) {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Failed to parse frame: {e}");
            state.audit.append(
                AuditAction::Error,
                "unknown",
                &format!("Failed to process message: {e}"),
            );
            return;
        }
    };

    let message: ClientMessage = match serde_json::from_value(value) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("Ignoring unrecognized message: {e}");
            return;
        }
    };

    let _gate = state.handler_gate.lock().await;

    let user_name = sender_name(state, &message).await;
    let board = BoardMutationUseCase::new(state.repository.clone(), state.audit.clone());

    match message {
        ClientMessage::UserJoined { user } => {
            let join = JoinUserUseCase::new(state.registry.clone(), state.audit.clone());
            join.execute(user.clone(), connection).await;

            // Seed the new client, then tell everyone
            state
                .send_to(
                    connection,
                    &ServerMessage::BoardData {
                        data: board.board().await,
                    },
                )
                .await;
            state.broadcast(&ServerMessage::UserJoined { user }).await;
            state
                .broadcast(&ServerMessage::UsersList {
                    users: join.users_list().await,
                })
                .await;
        }

        ClientMessage::GetBoard => {
            state
                .send_to(
                    connection,
                    &ServerMessage::BoardData {
                        data: board.board().await,
                    },
                )
                .await;
        }

        ClientMessage::CardMoved {
            user_id,
            card_id,
            from_column_id,
            to_column_id,
        } => {
            if board
                .move_card(&user_name, &card_id, from_column_id, to_column_id)
                .await
            {
                state
                    .broadcast(&ServerMessage::CardMoved {
                        user_id,
                        card_id,
                        from_column_id,
                        to_column_id,
                    })
                    .await;
            }
        }

        ClientMessage::CardCreated {
            user_id,
            column_id,
            card,
        } => {
            if board.create_card(&user_name, column_id, card.clone()).await {
                state
                    .broadcast(&ServerMessage::CardCreated {
                        user_id,
                        column_id,
                        card,
                    })
                    .await;
            }
        }

        ClientMessage::CardUpdated {
            user_id,
            column_id,
            card,
        } => {
            if board.update_card(&user_name, column_id, card.clone()).await {
                state
                    .broadcast(&ServerMessage::CardUpdated {
                        user_id,
                        column_id,
                        card,
                    })
                    .await;
            }
        }

        ClientMessage::CardDeleted {
            user_id,
            column_id,
            card_id,
        } => {
            if board.delete_card(&user_name, column_id, &card_id).await {
                state
                    .broadcast(&ServerMessage::CardDeleted {
                        user_id,
                        column_id,
                        card_id,
                    })
                    .await;
            }
        }

        ClientMessage::CardReordered {
            user_id,
            column_id,
            cards,
        } => {
            if board
                .reorder_cards(&user_name, column_id, cards.clone())
                .await
            {
                state
                    .broadcast(&ServerMessage::CardReordered {
                        user_id,
                        column_id,
                        cards,
                    })
                    .await;
            }
        }

        ClientMessage::AlertCreated {
            user_id: _,
            alert_text,
        } => {
            let alert = AlertUseCase::new(state.alert.clone(), state.audit.clone());
            alert.set(&user_name, alert_text.clone()).await;
            state
                .broadcast(&ServerMessage::AlertCreated { alert_text })
                .await;
        }

        ClientMessage::AlertCleared { user_id: _ } => {
            let alert = AlertUseCase::new(state.alert.clone(), state.audit.clone());
            alert.clear(&user_name).await;
            state.broadcast(&ServerMessage::AlertCleared).await;
        }

        ClientMessage::ResetBoard { user_id: _ } => {
            let data = board.reset_board(&user_name).await;
            state.broadcast(&ServerMessage::BoardData { data }).await;
        }
    }
}

/// Display name for audit attribution.
///
/// `userId` is looked up in the registry; a joining user is named by their
/// own profile; anyone else degrades to "unknown" (a connection may mutate
/// before joining).
async fn sender_name(state: &AppState, message: &ClientMessage) -> String {
    let user_id = match message {
        ClientMessage::UserJoined { user } => return user.name.clone(),
        ClientMessage::CardMoved { user_id, .. }
        | ClientMessage::CardCreated { user_id, .. }
        | ClientMessage::CardUpdated { user_id, .. }
        | ClientMessage::CardDeleted { user_id, .. }
        | ClientMessage::CardReordered { user_id, .. }
        | ClientMessage::AlertCreated { user_id, .. }
        | ClientMessage::AlertCleared { user_id }
        | ClientMessage::ResetBoard { user_id } => user_id.as_deref(),
        ClientMessage::GetBoard => None,
    };

    match user_id {
        Some(id) => state
            .registry
            .lock()
            .await
            .name_of(id)
            .unwrap_or("unknown")
            .to_string(),
        None => "unknown".to_string(),
    }
}
