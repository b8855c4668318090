//! Bookshelf server entry point.
//!
//! Queries and mutations are served at /graphql, subscriptions at /graphql/ws.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use bookshelf::cli::CliOptions;
use bookshelf::config::Config;
use bookshelf::db::{Database, SeedData};
use bookshelf::events::ReviewEventHub;
use bookshelf::{AppState, build_app, logging};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let mut config = Config::from_env()?;
    config.apply_cli(&CliOptions::from_args());
    logging::init_tracing(&config)?;

    info!("Starting Bookshelf");

    let db = load_database(&config)?;
    info!(
        books = db.books().read().len(),
        authors = db.authors().read().len(),
        "Store ready"
    );

    let hub = ReviewEventHub::new();
    let config = Arc::new(config);
    let state = AppState::new(config.clone(), db, hub.clone());
    let app = build_app(state);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("Query endpoint ready at http://localhost:{}/graphql", config.port);
    info!("Subscription endpoint ready at ws://localhost:{}/graphql/ws", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(hub))
        .await
        .context("axum::serve")?;

    info!("Server stopped");
    Ok(())
}

fn load_database(config: &Config) -> Result<Database> {
    if !config.seed_data {
        info!("Seeding disabled, starting with an empty store");
        return Ok(Database::new());
    }
    let seed = match &config.seed_file {
        Some(path) => SeedData::from_file(path)?,
        None => SeedData::embedded()?,
    };
    Ok(Database::from_seed(seed))
}

/// Resolve on Ctrl-C or SIGTERM, then end every open subscription stream
async fn shutdown_signal(hub: ReviewEventHub) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, closing subscriptions");
    hub.shutdown();
}
