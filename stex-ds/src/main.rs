//! Statement extraction dispatch service (stex-ds) - Main entry point
//!
//! Accepts uploaded bank statement files over HTTP, routes each one to the
//! registered extractor for its bank, and returns the extracted transaction
//! table.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stex_common::config;
use stex_ds::registry::ExtractorRegistry;
use stex_ds::staging::StagingArea;
use stex_ds::{build_router, AppState};

/// Command-line arguments for stex-ds
#[derive(Parser, Debug)]
#[command(name = "stex-ds")]
#[command(about = "Statement extraction dispatch service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5750", env = "STEX_DS_PORT")]
    port: u16,

    /// Staging folder for uploaded statement files
    #[arg(short, long, env = "STEX_STAGING_FOLDER")]
    staging_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stex_ds=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting stex-ds v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    // Staging folder: CLI > env > config file > OS temp default, with a
    // one-time fallback if the chosen folder is not writable.
    let primary = config::resolve_staging_folder(
        args.staging_folder.as_deref(),
        "STEX_STAGING_FOLDER",
    );
    let staging = StagingArea::initialize(primary, config::fallback_staging_folder());
    info!("Staging folder: {}", staging.dir().display());

    let registry =
        ExtractorRegistry::with_builtin_banks().context("Failed to build extractor registry")?;
    info!("Registered {} bank extractors", registry.len());

    let state = AppState::new(registry, staging);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Starting HTTP server on {}", addr);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        }
    }
}
