//! Linux-specific foreground app detection
//!
//! Asks the X server directly first, then falls back to `xdotool`.

use super::{ForegroundApp, ProbeError};
use std::process::Command;
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::xproto::{Atom, AtomEnum, ConnectionExt, Window};
use x11rb::rust_connection::RustConnection;

pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    match x11_window_title() {
        Ok(title) => Ok(ForegroundApp::from_title(title)),
        Err(e) => {
            debug!(error = %e, "X11 lookup failed, trying xdotool");
            xdotool_window_title().map(ForegroundApp::from_title)
        }
    }
}

/// "Terminal on <host>" when the hostname is known, "Linux Terminal" otherwise
pub fn fallback_label() -> String {
    match Command::new("hostname").output() {
        Ok(output) if output.status.success() => {
            let host = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if host.is_empty() {
                "Linux Terminal".to_string()
            } else {
                format!("Terminal on {}", host)
            }
        }
        Ok(_) => "Linux Terminal".to_string(),
        Err(e) => {
            debug!(error = %e, "hostname lookup failed");
            "Linux Terminal".to_string()
        }
    }
}

fn query_err(what: &str, e: impl std::fmt::Display) -> ProbeError {
    ProbeError::Query(format!("{}: {}", what, e))
}

fn intern(conn: &RustConnection, name: &[u8]) -> Result<Atom, ProbeError> {
    Ok(conn
        .intern_atom(false, name)
        .map_err(|e| query_err("failed to intern atom", e))?
        .reply()
        .map_err(|e| query_err("failed to get atom reply", e))?
        .atom)
}

fn property(
    conn: &RustConnection,
    window: Window,
    atom: Atom,
    type_: impl Into<Atom>,
    long_length: u32,
) -> Result<Vec<u8>, ProbeError> {
    Ok(conn
        .get_property(false, window, atom, type_, 0, long_length)
        .map_err(|e| query_err("failed to get property", e))?
        .reply()
        .map_err(|e| query_err("failed to get property reply", e))?
        .value)
}

fn x11_window_title() -> Result<String, ProbeError> {
    let (conn, screen_num) =
        RustConnection::connect(None).map_err(|e| query_err("X11 connection failed", e))?;
    let root = conn.setup().roots[screen_num].root;

    let active_window_atom = intern(&conn, b"_NET_ACTIVE_WINDOW")?;
    let value = property(&conn, root, active_window_atom, AtomEnum::WINDOW, 1)?;
    if value.len() < 4 {
        return Err(ProbeError::NoForegroundWindow);
    }

    let active_window = u32::from_ne_bytes([value[0], value[1], value[2], value[3]]);
    if active_window == 0 {
        return Err(ProbeError::NoForegroundWindow);
    }

    // _NET_WM_NAME is UTF-8; older clients only set the legacy WM_NAME
    let wm_name_atom = intern(&conn, b"_NET_WM_NAME")?;
    let utf8_string_atom = intern(&conn, b"UTF8_STRING")?;
    let mut name = property(&conn, active_window, wm_name_atom, utf8_string_atom, 1024)?;
    if name.is_empty() {
        name = property(&conn, active_window, AtomEnum::WM_NAME.into(), AtomEnum::ANY, 1024)?;
    }

    let title = String::from_utf8_lossy(&name).into_owned();
    if title.trim().is_empty() {
        return Err(ProbeError::Query("active window has no title".to_string()));
    }
    Ok(title)
}

fn xdotool_window_title() -> Result<String, ProbeError> {
    let output = Command::new("xdotool")
        .args(["getwindowfocus", "getwindowname"])
        .output()
        .map_err(|source| ProbeError::Command {
            command: "xdotool",
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ProbeError::Query(format!("xdotool failed: {}", stderr.trim())));
    }

    let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if title.is_empty() {
        return Err(ProbeError::NoForegroundWindow);
    }
    Ok(title)
}
