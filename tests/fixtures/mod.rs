//! Shared test fixtures.

use std::path::PathBuf;
use std::time::Duration;

use kanban_board_rs::{run_server, ServerConfig};

/// A server instance spawned on its own port with its own temp files.
///
/// Each test uses a distinct port so suites can run in parallel.
pub struct TestServer {
    port: u16,
    pub data_file: PathBuf,
    pub log_file: PathBuf,
}

impl TestServer {
    pub async fn start(port: u16) -> Self {
        let dir = std::env::temp_dir().join(format!("kanban-it-{port}-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("Failed to create test dir");
        let data_file = dir.join("data.json");
        let log_file = dir.join("activity.log");

        let config = ServerConfig {
            port,
            data_file: data_file.clone(),
            log_file: log_file.clone(),
        };
        tokio::spawn(async move {
            if let Err(e) = run_server(config).await {
                panic!("Test server failed: {e}");
            }
        });

        // Wait until the listener accepts connections
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                return Self {
                    port,
                    data_file,
                    log_file,
                };
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        panic!("Test server on port {port} did not come up");
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }
}
