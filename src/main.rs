//! newswire: the cycling engine HTTP server.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use newswire::adapters::{
    app_router, CycleAppState, InMemoryCursorStore, JsonFileSource, RedisCursorStore,
};
use newswire::config::{AppConfig, StoreBackend, StoreConfig};
use newswire::ports::CursorStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    newswire::telemetry::init(&config.server).context("failed to install tracing")?;

    // Validate configuration
    config.validate().context("invalid configuration")?;

    let source = Arc::new(JsonFileSource::new(config.source.path.clone()));
    let store = build_store(&config.store).await?;

    info!(
        source = %config.source.path.display(),
        backend = ?config.store.backend,
        mode = ?config.engine.mode,
        gating = config.engine.consumption_gating,
        "newswire engine configured"
    );

    let state = CycleAppState::new(source, store)
        .with_mode(config.engine.mode)
        .with_advance_config(config.engine.advance_config())
        .with_request_timeout(config.server.request_timeout());
    let app = app_router(state);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(%addr, "newswire engine listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("newswire engine stopped");
    Ok(())
}

async fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn CursorStore>> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryCursorStore::new())),
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("store.redis_url is required for the redis backend")?;
            let store = RedisCursorStore::connect(url, config.key_prefix.clone())
                .await
                .context("failed to connect to redis")?;
            info!(prefix = %config.key_prefix, "connected to redis cursor store");
            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
