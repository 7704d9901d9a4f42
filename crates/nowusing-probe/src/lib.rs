//! Foreground application probe for NowUsing
//!
//! Each platform module answers one question: which application has input
//! focus right now. [`NativeProbe`] wraps that lookup so it never fails, and
//! [`Poller`] feeds its answers into the shared [`nowusing_core::StatusStore`].

pub mod platform;
pub mod poller;

use tracing::debug;

pub use platform::{executable_label, ForegroundApp, ProbeError, UNKNOWN_LABEL};
pub use poller::Poller;

/// Point-in-time, best-effort lookup of the focused application's name
pub trait ForegroundAppProbe: Send + Sync {
    /// Display name of the focused application. Never empty, never fails.
    fn current_application_label(&self) -> String;
}

/// Probe backed by the operating system of the build target
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProbe;

impl NativeProbe {
    pub fn new() -> Self {
        Self
    }
}

impl ForegroundAppProbe for NativeProbe {
    fn current_application_label(&self) -> String {
        match platform::foreground_app() {
            Ok(app) => match app.label() {
                Some(label) => label.to_string(),
                None => {
                    debug!("foreground window has no usable name");
                    platform::fallback_label()
                }
            },
            Err(e) => {
                debug!(error = %e, "foreground lookup failed");
                platform::fallback_label()
            }
        }
    }
}

/// Probe that always reports the same label
#[derive(Debug, Clone)]
pub struct FixedProbe {
    label: String,
}

impl FixedProbe {
    pub fn new(label: impl Into<String>) -> Self {
        let label: String = label.into();
        Self {
            label: if label.is_empty() {
                UNKNOWN_LABEL.to_string()
            } else {
                label
            },
        }
    }
}

impl ForegroundAppProbe for FixedProbe {
    fn current_application_label(&self) -> String {
        self.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_probe_never_returns_empty() {
        // Headless test machines take the fallback path
        let label = NativeProbe::new().current_application_label();
        assert!(!label.trim().is_empty());
    }

    #[test]
    fn test_fixed_probe() {
        assert_eq!(FixedProbe::new("Editor").current_application_label(), "Editor");
        assert_eq!(FixedProbe::new("").current_application_label(), UNKNOWN_LABEL);
    }
}
