//! Statuscat - a caching HTTP proxy for status code images
//!
//! Serves status-code images from an on-disk cache, falling back to a
//! remote image provider on a cache miss.

use anyhow::Context;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statuscat::api::{create_router, AppState};
use statuscat::config::Config;

/// Main entry point for the caching proxy.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache directory (fatal on failure)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on the configured address
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statuscat=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting statuscat caching proxy");

    // Load configuration from environment variables
    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        "Configuration loaded: host={}, port={}, cache_dir={}, upstream={}",
        config.bind_host,
        config.server_port,
        config.cache_dir.display(),
        config.upstream_url
    );

    // Create application state; this creates the cache directory and must
    // succeed before the server accepts any traffic
    let state = AppState::from_config(&config)
        .await
        .context("failed to initialize cache directory")?;
    info!("Cache directory ready at {}", state.cache.root().display());

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to the configured address
    let listener = tokio::net::TcpListener::bind((config.bind_host.as_str(), config.server_port))
        .await
        .context("failed to bind server address")?;
    info!(
        "Proxy server listening on http://{}",
        listener.local_addr().context("failed to read local address")?
    );

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
