//! Server assembly and startup.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::{
    domain::{AuditAction, AuditSink, BoardRepository},
    infrastructure::{FileAuditLog, FileBoardRepository},
    ui::{
        handler::{board_state, health_check, websocket_handler},
        signal::shutdown_signal,
        state::AppState,
    },
};

/// Runtime configuration, resolved from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// TCP port to listen on (all interfaces)
    pub port: u16,
    /// Board snapshot slot
    pub data_file: PathBuf,
    /// Append-only activity log
    pub log_file: PathBuf,
}

/// Build the application state and serve until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let audit: Arc<dyn AuditSink> = Arc::new(FileAuditLog::new(&config.log_file));
    let repository: Arc<dyn BoardRepository> =
        Arc::new(FileBoardRepository::load(&config.data_file, audit.clone()));
    let state = Arc::new(AppState::new(repository.clone(), audit.clone()));

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/api/board", get(board_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {addr}");
    tracing::info!("Board snapshot slot: {}", config.data_file.display());
    tracing::info!("Activity log: {}", config.log_file.display());
    audit.append(AuditAction::Start, "system", "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Flush the snapshot one last time before exiting
    repository.persist().await;
    tracing::info!("Board snapshot flushed, exiting");
    Ok(())
}
