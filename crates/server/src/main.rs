use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopsight_core::{load_catalog, load_config, validate_config};

use shopsight_server::api::create_router;
use shopsight_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logging before anything that can fail
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::var("SHOPSIGHT_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    info!("Reading config from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Could not load config from {:?}", config_path))?;
    validate_config(&config).context("Invalid configuration")?;

    info!("Config OK, catalog source {:?}", config.catalog.path);

    // Load the catalog once; a service without products is not worth starting
    let catalog = load_catalog(&config.catalog.path)
        .with_context(|| format!("Could not load catalog from {:?}", config.catalog.path))?;

    let stats = catalog.stats();
    info!(
        "Catalog loaded: {} products ({} in stock), {} categories, {} brands",
        stats.total_products, stats.in_stock_count, stats.category_count, stats.brand_count
    );
    if stats.skipped_rows > 0 {
        info!("Skipped {} unusable catalog rows", stats.skipped_rows);
    }

    let state = Arc::new(AppState::new(config.clone(), Arc::new(catalog)));
    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Could not bind {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server exited with error")?;

    info!("Shutdown complete");

    Ok(())
}

/// Resolve once the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Ctrl+C handler installation failed");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation failed")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
