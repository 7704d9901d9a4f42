//! Best-effort launch of the default browser

use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Open `url` in the default browser after `delay`.
///
/// Failure is only logged; the server keeps running either way.
pub fn spawn_open(url: String, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let target = url.clone();
        match tokio::task::spawn_blocking(move || open::that(&target)).await {
            Ok(Ok(())) => info!(%url, "Opened browser"),
            Ok(Err(e)) => warn!(%url, error = %e, "Failed to open browser"),
            Err(e) => warn!(%url, error = %e, "Browser launch task failed"),
        }
    })
}
