//! Kanban board synchronization server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! ```

use std::path::PathBuf;

use clap::Parser;

use kanban_board_rs::logger::setup_logger;
use kanban_board_rs::ServerConfig;

#[derive(Debug, Parser)]
#[command(about = "Real-time kanban board synchronization server")]
struct Args {
    /// Port to listen on (all interfaces)
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Board snapshot file
    #[arg(long, env = "DATA_FILE", default_value = "data.json")]
    data_file: PathBuf,

    /// Activity log file
    #[arg(long, env = "LOG_FILE", default_value = "activity.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger("kanban_board_rs", "debug");

    let args = Args::parse();
    let config = ServerConfig {
        port: args.port,
        data_file: args.data_file,
        log_file: args.log_file,
    };

    // Run the server
    if let Err(e) = kanban_board_rs::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
