//! Built-in configuration
//!
//! There is no config file, no flags and no environment parsing: the values
//! below are the whole configuration surface.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name shown as the owner on the page
    pub username: String,
    /// Address the HTTP listener binds to
    pub host: IpAddr,
    /// Port the HTTP listener binds to
    pub port: u16,
    /// Poll interval for the probe and for the page's refresh timer
    pub refresh_interval_ms: u64,
    /// Open the default browser on the page once the server is up
    pub open_browser: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            username: "zz".to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            refresh_interval_ms: 1000,
            open_browser: true,
        }
    }
}

impl Config {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Address handed to the browser
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}
