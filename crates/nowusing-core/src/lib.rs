//! NowUsing Core Library
//!
//! Provides the fixed configuration and the shared activity status
//! for the NowUsing focus display.

pub mod config;
pub mod status;

pub use config::Config;
pub use status::StatusStore;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Label shown before the first probe has completed
pub const PLACEHOLDER_APP: &str = "starting....";

/// Format used for `ActivityStatus::timestamp`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the owner is doing right now (also the JSON shape of `/api/status`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityStatus {
    /// Owner shown on the page, fixed at startup
    pub username: String,
    /// Label of the application that had focus at the last probe
    pub app: String,
    /// Local time of the last probe, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// Format a local time the way `ActivityStatus::timestamp` carries it
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
