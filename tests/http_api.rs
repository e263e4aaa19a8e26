//! HTTP API integration tests.

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // given:
    let server = TestServer::start(19080).await;
    let client = reqwest::Client::new();

    // when:
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then:
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_board_endpoint_serves_default_template() {
    // given: a fresh server with no prior snapshot
    let server = TestServer::start(19081).await;
    let client = reqwest::Client::new();

    // when:
    let response = client
        .get(format!("{}/api/board", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then: the fixed 21-column board, intake column first and unlimited
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let columns = body["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 21);
    assert_eq!(columns[0]["title"], "Заказы");
    assert!(columns[0]["wipLimit"].is_null());
    assert_eq!(columns[1]["wipLimit"], 3);
    assert_eq!(columns[20]["title"], "Склад");
}

#[tokio::test]
async fn test_startup_writes_audit_start_entry() {
    // given:
    let server = TestServer::start(19082).await;

    // then: the activity log opens with a START line attributed to system
    let content = std::fs::read_to_string(&server.log_file).expect("Failed to read log");
    let first = content.lines().next().unwrap();
    assert!(first.contains("START | User: system | Server started"));
}
