//! Shared activity status
//!
//! One writer (the poller) and any number of readers (HTTP handlers).
//! The application label and its timestamp live under the same lock so a
//! reader can never pair a new label with an old time.

use crate::{format_timestamp, ActivityStatus, PLACEHOLDER_APP};
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
struct Sample {
    app: String,
    timestamp: String,
}

/// Handle to the current activity status. Clones share the same record.
#[derive(Debug, Clone)]
pub struct StatusStore {
    username: Arc<str>,
    current: Arc<RwLock<Sample>>,
}

impl StatusStore {
    /// Create the store with the placeholder label, stamped now
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_start_time(username, Local::now())
    }

    pub fn with_start_time(username: impl Into<String>, at: DateTime<Local>) -> Self {
        let username: String = username.into();
        Self {
            username: Arc::from(username),
            current: Arc::new(RwLock::new(Sample {
                app: PLACEHOLDER_APP.to_string(),
                timestamp: format_timestamp(at),
            })),
        }
    }

    /// Replace the current application, stamped with the current local time
    pub fn update(&self, app: impl Into<String>) {
        self.update_at(app, Local::now());
    }

    /// Replace the current application with an explicit timestamp
    pub fn update_at(&self, app: impl Into<String>, at: DateTime<Local>) {
        // Build the new sample before taking the lock
        let sample = Sample {
            app: app.into(),
            timestamp: format_timestamp(at),
        };
        trace!(app = %sample.app, timestamp = %sample.timestamp, "status updated");
        *self.current.write() = sample;
    }

    /// Consistent copy of the current status
    pub fn snapshot(&self) -> ActivityStatus {
        let current = self.current.read();
        ActivityStatus {
            username: self.username.to_string(),
            app: current.app.clone(),
            timestamp: current.timestamp.clone(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::thread;

    fn base_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_initial_snapshot() {
        let store = StatusStore::with_start_time("zz", base_time());
        let status = store.snapshot();

        assert_eq!(status.username, "zz");
        assert_eq!(status.app, PLACEHOLDER_APP);
        assert_eq!(status.timestamp, "2024-01-15 10:00:00");
    }

    #[test]
    fn test_snapshot_returns_latest_update() {
        let store = StatusStore::with_start_time("zz", base_time());

        for (i, app) in ["Terminal", "Firefox", "Notes", "Firefox"].iter().enumerate() {
            let at = base_time() + Duration::seconds(i as i64 + 1);
            store.update_at(*app, at);

            let status = store.snapshot();
            assert_eq!(status.app, *app);
            assert_eq!(status.timestamp, format_timestamp(at));
            assert_eq!(status.username, "zz");
        }
    }

    #[test]
    fn test_clones_share_state() {
        let store = StatusStore::new("zz");
        let reader = store.clone();

        store.update("Editor");
        assert_eq!(reader.snapshot().app, "Editor");
        assert_eq!(reader.username(), "zz");
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_pair() {
        const WRITES: i64 = 2000;
        const READERS: usize = 8;

        let store = StatusStore::with_start_time("zz", base_time());

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..WRITES {
                        let status = store.snapshot();
                        if status.app == PLACEHOLDER_APP {
                            assert_eq!(status.timestamp, format_timestamp(base_time()));
                            continue;
                        }
                        let n: i64 = status.app.trim_start_matches("app-").parse().unwrap();
                        let expected = format_timestamp(base_time() + Duration::seconds(n));
                        assert_eq!(status.timestamp, expected, "torn read for {}", status.app);
                    }
                })
            })
            .collect();

        for n in 1..=WRITES {
            store.update_at(format!("app-{}", n), base_time() + Duration::seconds(n));
        }

        for reader in readers {
            reader.join().unwrap();
        }

        let last = store.snapshot();
        assert_eq!(last.app, format!("app-{}", WRITES));
    }
}
