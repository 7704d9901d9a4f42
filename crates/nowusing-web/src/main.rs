//! NowUsing
//!
//! Samples the focused application on a timer and shows it on a local
//! auto-refreshing web page.

use anyhow::{Context, Result};
use nowusing_core::{Config, StatusStore};
use nowusing_probe::{NativeProbe, Poller};
use nowusing_web::{browser, router, AppState};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nowusing=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::default();
    let store = StatusStore::new(config.username.clone());

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = Poller::new(
        Arc::new(NativeProbe::new()),
        store.clone(),
        config.refresh_interval(),
    )
    .spawn(shutdown_rx);

    let app = router(AppState::new(store, config.refresh_interval_ms));

    let addr = config.listen_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind HTTP listener");
            return Err(e).with_context(|| format!("failed to bind {}", addr));
        }
    };
    info!("Server running at {} (listening on {})", config.url(), addr);

    if config.open_browser {
        browser::spawn_open(config.url(), Duration::from_secs(1));
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
            info!("Shutting down");
        })
        .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = poller.await {
        error!(error = %e, "Poller task failed");
    }

    served.context("HTTP server failed")?;
    info!("NowUsing stopped");
    Ok(())
}
