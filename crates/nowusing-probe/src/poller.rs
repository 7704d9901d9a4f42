//! Periodic probing into the status store

use crate::{ForegroundAppProbe, UNKNOWN_LABEL};
use nowusing_core::StatusStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, trace};

/// Runs the probe on a fixed interval and stores each answer
pub struct Poller {
    probe: Arc<dyn ForegroundAppProbe>,
    store: StatusStore,
    interval: Duration,
}

impl Poller {
    pub fn new(probe: Arc<dyn ForegroundAppProbe>, store: StatusStore, interval: Duration) -> Self {
        Self {
            probe,
            store,
            interval,
        }
    }

    /// Start polling on the current runtime
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Poll until `shutdown` turns true or its sender is dropped.
    ///
    /// The first probe runs immediately, then once per interval.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_ms = self.interval.as_millis() as u64, "Poller started");
        let mut last: Option<String> = None;

        loop {
            if *shutdown.borrow() {
                break;
            }

            let label = self.probe_once().await;
            if last.as_deref() != Some(label.as_str()) {
                info!(app = %label, "Foreground application changed");
            } else {
                trace!(app = %label, "Foreground application unchanged");
            }
            self.store.update(label.clone());
            last = Some(label);

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!("Poller stopped");
    }

    /// Probes may block on system calls or child processes
    async fn probe_once(&self) -> String {
        let probe = Arc::clone(&self.probe);
        match tokio::task::spawn_blocking(move || probe.current_application_label()).await {
            Ok(label) => label,
            Err(e) => {
                error!(error = %e, "Probe task failed");
                UNKNOWN_LABEL.to_string()
            }
        }
    }
}
