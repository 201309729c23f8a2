//! CLI entry point for the roster-api HTTP service.

use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use roster_api::AppState;
use roster_core::config::{self, DatabaseSettings, ServerSettings};
use roster_graph::{EmployeeStore, GraphClient, GraphConfig, MemoryStore};

#[derive(Parser)]
#[command(name = "roster-api")]
#[command(about = "HTTP directory service for Employee nodes in Neo4j")]
struct Cli {
    /// Config file prefix (default: roster).
    #[arg(short, long, default_value = "roster")]
    config: String,

    /// Listen address, overriding server.bind.
    #[arg(short, long)]
    bind: Option<String>,

    /// Serve from an in-process store instead of Neo4j. Data is lost on exit.
    #[arg(long)]
    in_memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loaded before the subscriber so RUST_LOG may come from .env.
    let dotenv_error = roster_api::env::load_dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    if let Some(e) = dotenv_error {
        tracing::warn!(error = %e, "Failed to load .env");
    }

    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    let mut server = ServerSettings::from_config(&cfg)?;
    if let Some(bind) = cli.bind {
        server.bind = bind;
    }

    let store: Arc<dyn EmployeeStore> = if cli.in_memory {
        tracing::warn!("Serving from the in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        let db = DatabaseSettings::from_config(&cfg)?;
        Arc::new(GraphClient::connect(&GraphConfig::from(&db)).await?)
    };

    let state = AppState::new(store).with_request_timeout(server.request_timeout());
    let app = roster_api::router(state);

    let listener = tokio::net::TcpListener::bind(&server.bind).await?;
    tracing::info!(addr = %server.bind, timeout_secs = server.request_timeout_secs, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
