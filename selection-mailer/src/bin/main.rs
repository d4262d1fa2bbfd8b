//! selection-mailer server

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::{net::TcpListener, signal};

use selection_mailer::{
    config::{AppConfig, SERVICE_NAME},
    handlers, observability,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "selection-mailer")]
#[command(version)]
#[command(about = "Validate selection-task submissions and email them", long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    observability::init()?;

    let config = match cli.config {
        Some(path) => AppConfig::load_from(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load_for_service(SERVICE_NAME)?,
    };

    let addr = config.server.bind_address();
    let state = AppState::from_config(config).await?;

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, handlers::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
        () = ctrl_c => tracing::info!("Received SIGINT"),
        () = terminate => tracing::info!("Received SIGTERM"),
    }
}
