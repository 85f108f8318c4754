use anyhow::Context;
use kindler_core::{Config, Kindler};
use kindler_server::router;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kindler_server=debug,kindler_core=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let kindler = Kindler::from_config(&config).context("Failed to set up pipeline")?;
    info!("Working directory: {}", kindler.workdir().root().display());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(kindler))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
