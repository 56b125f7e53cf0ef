use anyhow::{Context, Result};
use freshmail_connector::api::create_router;
use freshmail_connector::FreshMailConnector;
use mailstats::{ConnectorConfig, MemoryCache};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "freshmail_connector=info,mailstats=info".into()),
        )
        .init();

    info!("FreshMail connector starting...");

    let config = ConnectorConfig::from_env().context("Failed to load configuration")?;
    info!(
        base_url = %config.upstream.base_url,
        port = config.server.port,
        max_pages = config.upstream.max_pages,
        list_ttl_seconds = config.cache.list_ttl_seconds,
        report_ttl_seconds = config.cache.report_ttl_seconds,
        "Configuration loaded"
    );

    let cache = Arc::new(MemoryCache::new());
    let connector = FreshMailConnector::new(&config, cache.clone())
        .context("Failed to build provider HTTP client")?;

    // Expired entries are otherwise only dropped when read again.
    let sweep_interval = Duration::from_secs(config.cache.sweep_interval_seconds.max(1));
    let sweeper = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            cache.cleanup_expired();
        }
    });

    let router = create_router(Arc::new(connector));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.server.port))
        .await
        .context("Failed to bind connector API port")?;
    info!(port = config.server.port, "Connector API listening");

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            tracing::error!(error = %e, "Connector API server error");
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl_c signal")?;
    info!("Shutdown signal received");

    server_handle.abort();
    sweeper.abort();
    info!("FreshMail connector stopped");

    Ok(())
}
