//! WebSocket protocol integration tests.
//!
//! Drives the server the way board clients do: typed JSON frames over a
//! WebSocket connection per client.

mod fixtures;

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message, MaybeTlsStream, WebSocketStream};

use fixtures::TestServer;

type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn connect(server: &TestServer) -> WsClient {
    let (ws, _) = connect_async(server.ws_url())
        .await
        .expect("Failed to connect");
    ws
}

async fn send(ws: &mut WsClient, frame: Value) {
    ws.send(Message::text(frame.to_string()))
        .await
        .expect("Failed to send frame");
}

/// Next text frame, parsed. Panics if nothing arrives within two seconds.
async fn recv(ws: &mut WsClient) -> Value {
    let msg = tokio::time::timeout(Duration::from_secs(2), ws.next())
        .await
        .expect("Timed out waiting for frame")
        .expect("Connection closed")
        .expect("WebSocket error");
    serde_json::from_str(msg.to_text().expect("Not a text frame")).expect("Frame is not JSON")
}

/// Asserts that no frame arrives within 300ms.
async fn expect_silence(ws: &mut WsClient) {
    let result = tokio::time::timeout(Duration::from_millis(300), ws.next()).await;
    assert!(result.is_err(), "Expected no frame, got {result:?}");
}

fn join_frame(user_id: &str, name: &str) -> Value {
    json!({
        "type": "user_joined",
        "user": {"id": user_id, "name": name, "color": "#ff8800"}
    })
}

/// Joins and drains the three frames the joiner receives (`board_data`,
/// `user_joined` echo, `users_list`).
async fn join(ws: &mut WsClient, user_id: &str, name: &str) {
    send(ws, join_frame(user_id, name)).await;
    assert_eq!(recv(ws).await["type"], "board_data");
    assert_eq!(recv(ws).await["type"], "user_joined");
    assert_eq!(recv(ws).await["type"], "users_list");
}

#[tokio::test]
async fn test_join_sequence() {
    // given:
    let server = TestServer::start(19180).await;
    let mut ws = connect(&server).await;

    // when:
    send(&mut ws, join_frame("u1", "Анна")).await;

    // then: board seed first, then the join echo, then the refreshed list
    let board = recv(&mut ws).await;
    assert_eq!(board["type"], "board_data");
    assert_eq!(board["data"]["columns"].as_array().unwrap().len(), 21);

    let joined = recv(&mut ws).await;
    assert_eq!(joined["type"], "user_joined");
    assert_eq!(joined["user"]["name"], "Анна");

    let list = recv(&mut ws).await;
    assert_eq!(list["type"], "users_list");
    assert_eq!(list["users"]["u1"]["color"], "#ff8800");
}

#[tokio::test]
async fn test_get_board_replies_to_sender_only() {
    // given: two joined clients
    let server = TestServer::start(19181).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "u1", "Анна").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "u2", "Борис").await;
    // Alice drains Bob's join broadcasts
    assert_eq!(recv(&mut alice).await["type"], "user_joined");
    assert_eq!(recv(&mut alice).await["type"], "users_list");

    // when:
    send(&mut alice, json!({"type": "get_board"})).await;

    // then: only Alice gets the reply
    assert_eq!(recv(&mut alice).await["type"], "board_data");
    expect_silence(&mut bob).await;
}

#[tokio::test]
async fn test_mutation_broadcast_reaches_everyone_including_sender() {
    // given: two joined clients
    let server = TestServer::start(19182).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "u1", "Анна").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "u2", "Борис").await;
    assert_eq!(recv(&mut alice).await["type"], "user_joined");
    assert_eq!(recv(&mut alice).await["type"], "users_list");

    // when: Alice creates a card
    send(
        &mut alice,
        json!({
            "type": "card_created",
            "userId": "u1",
            "columnId": 1,
            "card": {"id": 1001, "title": "Тираж 500", "note": "до пятницы"}
        }),
    )
    .await;

    // then: one identical event per connection, originator included
    let to_alice = recv(&mut alice).await;
    let to_bob = recv(&mut bob).await;
    assert_eq!(to_alice, to_bob);
    assert_eq!(to_alice["type"], "card_created");
    assert_eq!(to_alice["card"]["note"], "до пятницы");
}

#[tokio::test]
async fn test_card_move_round_trip() {
    // given: a joined client with a card in the intake column
    let server = TestServer::start(19183).await;
    let mut ws = connect(&server).await;
    join(&mut ws, "u1", "Анна").await;
    send(
        &mut ws,
        json!({"type": "card_created", "userId": "u1", "columnId": 1,
               "card": {"id": 7, "title": "Заказ"}}),
    )
    .await;
    assert_eq!(recv(&mut ws).await["type"], "card_created");

    // when: the card moves to column 2
    send(
        &mut ws,
        json!({"type": "card_moved", "userId": "u1", "cardId": 7,
               "fromColumnId": 1, "toColumnId": 2}),
    )
    .await;

    // then: the move is echoed and the board reflects it
    let moved = recv(&mut ws).await;
    assert_eq!(moved["type"], "card_moved");
    assert_eq!(moved["cardId"], 7);
    assert_eq!(moved["toColumnId"], 2);

    send(&mut ws, json!({"type": "get_board"})).await;
    let board = recv(&mut ws).await;
    let columns = board["data"]["columns"].as_array().unwrap();
    assert_eq!(columns[0]["cards"].as_array().unwrap().len(), 0);
    assert_eq!(columns[1]["cards"][0]["id"], 7);
}

#[tokio::test]
async fn test_noop_move_produces_no_broadcast() {
    // given:
    let server = TestServer::start(19184).await;
    let mut ws = connect(&server).await;
    join(&mut ws, "u1", "Анна").await;

    // when: moving a card that does not exist
    send(
        &mut ws,
        json!({"type": "card_moved", "userId": "u1", "cardId": 999,
               "fromColumnId": 1, "toColumnId": 2}),
    )
    .await;

    // then: nothing comes back, and the next reply is the get_board answer
    expect_silence(&mut ws).await;
    send(&mut ws, json!({"type": "get_board"})).await;
    assert_eq!(recv(&mut ws).await["type"], "board_data");
}

#[tokio::test]
async fn test_alert_replay_for_new_connections() {
    // given: an active alert
    let server = TestServer::start(19185).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "u1", "Анна").await;
    send(
        &mut alice,
        json!({"type": "alert_created", "userId": "u1", "alertText": "Стоп линия"}),
    )
    .await;
    assert_eq!(recv(&mut alice).await["type"], "alert_created");

    // when: a fresh connection opens, before sending anything
    let mut newcomer = connect(&server).await;

    // then: the alert is pushed immediately
    let replay = recv(&mut newcomer).await;
    assert_eq!(replay["type"], "alert_created");
    assert_eq!(replay["alertText"], "Стоп линия");

    // when: the alert is cleared and another connection opens
    send(&mut alice, json!({"type": "alert_cleared", "userId": "u1"})).await;
    assert_eq!(recv(&mut alice).await["type"], "alert_cleared");
    let mut later = connect(&server).await;

    // then: no replay
    expect_silence(&mut later).await;
}

#[tokio::test]
async fn test_reset_board_broadcasts_full_snapshot() {
    // given: a board with a card on it
    let server = TestServer::start(19186).await;
    let mut ws = connect(&server).await;
    join(&mut ws, "u1", "Анна").await;
    send(
        &mut ws,
        json!({"type": "card_created", "userId": "u1", "columnId": 1,
               "card": {"id": 1, "title": "Заказ"}}),
    )
    .await;
    assert_eq!(recv(&mut ws).await["type"], "card_created");

    // when:
    send(&mut ws, json!({"type": "reset_board", "userId": "u1"})).await;

    // then: everyone gets the fresh template as board_data
    let board = recv(&mut ws).await;
    assert_eq!(board["type"], "board_data");
    let columns = board["data"]["columns"].as_array().unwrap();
    assert!(columns.iter().all(|c| c["cards"].as_array().unwrap().is_empty()));
}

#[tokio::test]
async fn test_user_left_broadcast_on_disconnect() {
    // given: two joined clients
    let server = TestServer::start(19187).await;
    let mut alice = connect(&server).await;
    join(&mut alice, "u1", "Анна").await;
    let mut bob = connect(&server).await;
    join(&mut bob, "u2", "Борис").await;
    assert_eq!(recv(&mut alice).await["type"], "user_joined");
    assert_eq!(recv(&mut alice).await["type"], "users_list");

    // when: Bob's connection closes
    bob.close(None).await.expect("Failed to close");

    // then: Alice hears who left
    let left = recv(&mut alice).await;
    assert_eq!(left["type"], "user_left");
    assert_eq!(left["userId"], "u2");
}

#[tokio::test]
async fn test_malformed_json_keeps_connection_open() {
    // given:
    let server = TestServer::start(19188).await;
    let mut ws = connect(&server).await;

    // when: a frame that is not JSON, then a valid request
    ws.send(Message::text("not json at all"))
        .await
        .expect("Failed to send");
    send(&mut ws, json!({"type": "get_board"})).await;

    // then: no error reply, the connection still works
    assert_eq!(recv(&mut ws).await["type"], "board_data");
}

#[tokio::test]
async fn test_unknown_type_is_silently_ignored() {
    // given:
    let server = TestServer::start(19189).await;
    let mut ws = connect(&server).await;

    // when:
    send(&mut ws, json!({"type": "make_coffee", "strength": 11})).await;
    send(&mut ws, json!({"type": "get_board"})).await;

    // then:
    assert_eq!(recv(&mut ws).await["type"], "board_data");
}

#[tokio::test]
async fn test_mutations_persist_to_snapshot_in_order() {
    // given:
    let server = TestServer::start(19190).await;
    let mut ws = connect(&server).await;
    join(&mut ws, "u1", "Анна").await;

    // when: two back-to-back creations
    send(
        &mut ws,
        json!({"type": "card_created", "userId": "u1", "columnId": 1,
               "card": {"id": 1, "title": "первый"}}),
    )
    .await;
    send(
        &mut ws,
        json!({"type": "card_created", "userId": "u1", "columnId": 1,
               "card": {"id": 2, "title": "второй"}}),
    )
    .await;
    assert_eq!(recv(&mut ws).await["type"], "card_created");
    assert_eq!(recv(&mut ws).await["type"], "card_created");

    // then: the snapshot slot holds both, in arrival order
    let snapshot: Value =
        serde_json::from_str(&std::fs::read_to_string(&server.data_file).unwrap()).unwrap();
    let cards = snapshot["columns"][0]["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["title"], "первый");
    assert_eq!(cards[1]["title"], "второй");
}

#[tokio::test]
async fn test_mutation_before_join_is_accepted() {
    // given: a connection that never joined
    let server = TestServer::start(19191).await;
    let mut ws = connect(&server).await;

    // when: it creates a card anyway
    send(
        &mut ws,
        json!({"type": "card_created", "columnId": 1,
               "card": {"id": 1, "title": "аноним"}}),
    )
    .await;

    // then: the mutation is applied and echoed (audit just says unknown)
    let created = recv(&mut ws).await;
    assert_eq!(created["type"], "card_created");
    assert_eq!(created["card"]["title"], "аноним");
}
