//! Item API server entry point.

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use item_api::api::{create_router, AppState};
use item_api::config::Config;
use item_api::error::AppError;
use item_api::metrics;
use item_api::probe::probe_database;
use item_api::store::ItemStore;
use item_api::utils::shutdown_signal;

/// Minimal item CRUD API with generated docs.
#[derive(Parser, Debug)]
#[command(name = "item-api")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// HTTP listen port. Overrides PORT.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration before logging so RUST_LOG from .env applies
    let config_result = Config::load();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("item_api=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = config_result
                .as_ref()
                .map(|c| c.rust_log.clone())
                .unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level)
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = config_result.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        AppError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(port) = args.port {
        config.port = port;
    }

    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        AppError::InvalidConfig(e)
    })?;

    let store = if config.seed_items {
        ItemStore::seeded()
    } else {
        ItemStore::new()
    };

    let mut app_state = AppState::new(store);
    match metrics::install_recorder() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    // Start HTTP server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(AppError::from)?;
    info!("API listening on port {}", config.port);

    let router = create_router(app_state);
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    // Bounded, awaited probe. The server is already accepting requests.
    let database = config.database();
    probe_database(database.as_ref(), config.probe_timeout()).await;

    server.await??;
    info!("Server stopped");

    Ok(())
}
