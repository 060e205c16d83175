mod api;
mod cache;
mod config;
mod error;
mod search;
mod server;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::ResponseCache;
use config::Config;
use search::SearchEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("starting blog-search server");

    let config = Config::from_env()?;
    info!(
        public_dir = %config.public_dir.display(),
        listen_addr = %config.listen_addr,
        "config loaded"
    );

    let cache = ResponseCache::connect(config.redis_url.as_deref()).await;
    info!(enabled = cache.is_enabled(), "response cache ready");

    let engine = Arc::new(SearchEngine::load(config.search_index_path(), cache).await);
    if let Some(entries) = engine.entry_count().await {
        info!(entries, "search index ready");
    }

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "HTTP server listening");

    axum::serve(listener, server::router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("blog-search shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
