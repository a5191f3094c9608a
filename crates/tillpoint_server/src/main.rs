//! Tillpoint sync server binary.

use clap::Parser;
use std::net::SocketAddr;
use tillpoint_server::{AppState, ServerConfig};
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Reference sync server for Tillpoint terminals.
#[derive(Parser)]
#[command(name = "tillpoint-server")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address to bind to (overrides TILLPOINT_BIND)
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// Maximum records per push batch
    #[arg(long)]
    max_push_batch: Option<usize>,

    /// Require auth with this shared secret (overrides TILLPOINT_AUTH_SECRET)
    #[arg(long)]
    auth_secret: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tillpoint_server=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = ServerConfig::from_env();
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(max) = cli.max_push_batch {
        config.max_push_batch = max;
    }
    if let Some(secret) = cli.auth_secret {
        config = config.with_auth(secret.into_bytes());
    }

    let bind_addr = config.bind_addr;
    let app = tillpoint_server::router(AppState::new(config));

    tracing::info!("tillpoint sync server listening on {bind_addr}");
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}
