//! spellbook-api - Read-only spell lookup service
//!
//! Serves JSON lookups over a store previously loaded by spellbook-seed.

use anyhow::{Context, Result};
use clap::Parser;
use spellbook_api::{build_router, db, AppState};
use spellbook_common::config::{
    resolve_database_url_with, TomlConfig, DATABASE_URL_ENV, DEFAULT_PORT,
};
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info, warn};

/// Command-line arguments for spellbook-api
#[derive(Parser, Debug)]
#[command(name = "spellbook-api")]
#[command(about = "Read-only HTTP lookups over a spellbook database")]
#[command(version)]
struct Args {
    /// sqlx database URL (falls back to SPELLBOOK_DBURL, then config.toml)
    #[arg(short, long)]
    database_url: Option<String>,

    /// HTTP port to listen on
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "spellbook_api=info,spellbook_common=info,tower_http=info".into()
            }),
        )
        .init();

    let args = Args::parse();

    info!("Starting spellbook-api v{}", env!("CARGO_PKG_VERSION"));

    let toml_config = TomlConfig::load();
    let database_url =
        resolve_database_url_with(args.database_url.as_deref(), DATABASE_URL_ENV, &toml_config)
            .context("Failed to resolve database URL")?;
    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);

    let pool = match db::connect_readonly(&database_url).await {
        Ok(pool) => {
            info!("Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e);
        }
    };

    let app = build_router(AppState::new(pool));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("spellbook-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
