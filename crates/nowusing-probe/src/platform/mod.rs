//! Platform-specific functionality for foreground app detection

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
mod linux;

use thiserror::Error;

/// Label used when nothing more specific is known
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("No foreground window")]
    NoForegroundWindow,
    #[error("Window system query failed: {0}")]
    Query(String),
    #[error("Failed to run {command}: {source}")]
    Command {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported platform")]
    Unsupported,
}

/// What a single lookup managed to find out about the foreground window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForegroundApp {
    /// Title of the focused window
    pub title: Option<String>,
    /// Executable name of the owning process, extension stripped
    pub executable: Option<String>,
}

impl ForegroundApp {
    pub fn from_title(title: impl Into<String>) -> Self {
        Self {
            title: non_empty(title.into()),
            executable: None,
        }
    }

    /// Best display name: executable first, then the window title
    pub fn label(&self) -> Option<&str> {
        self.executable
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.title.as_deref().filter(|s| !s.is_empty()))
    }
}

/// Derive a display name from an executable path.
///
/// Takes the trailing path segment and strips the extension after the last
/// dot, so `C:\Programs\Notes.exe` becomes `Notes`. Dot files keep their
/// whole name.
pub fn executable_label(path: &str) -> Option<String> {
    let file_name = path.rsplit(['\\', '/']).next()?.trim();
    if file_name.is_empty() {
        return None;
    }

    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(i) => &file_name[..i],
    };
    Some(stem.to_string())
}

pub(crate) fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == s.len() {
        Some(s)
    } else {
        Some(trimmed.to_string())
    }
}

/// Look up the foreground application
#[cfg(target_os = "macos")]
pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    macos::foreground_app()
}

#[cfg(target_os = "windows")]
pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    windows::foreground_app()
}

#[cfg(target_os = "linux")]
pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    linux::foreground_app()
}

#[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    Err(ProbeError::Unsupported)
}

/// Label reported when the lookup fails. Never empty.
#[cfg(target_os = "linux")]
pub fn fallback_label() -> String {
    linux::fallback_label()
}

#[cfg(not(target_os = "linux"))]
pub fn fallback_label() -> String {
    UNKNOWN_LABEL.to_string()
}
