//! macOS-specific foreground app detection using Cocoa/AppKit

use super::{non_empty, ForegroundApp, ProbeError};
use cocoa::base::{id, nil};
use objc::{class, msg_send, sel, sel_impl};

pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    unsafe {
        let workspace: id = msg_send![class!(NSWorkspace), sharedWorkspace];
        if workspace == nil {
            return Err(ProbeError::Query("failed to get shared workspace".to_string()));
        }

        let frontmost: id = msg_send![workspace, frontmostApplication];
        if frontmost == nil {
            return Err(ProbeError::NoForegroundWindow);
        }

        // localizedName is already the display name, no path to trim
        let name: id = msg_send![frontmost, localizedName];
        let name = if name != nil {
            nsstring_to_string(name)
        } else {
            String::new()
        };

        Ok(ForegroundApp {
            title: None,
            executable: non_empty(name),
        })
    }
}

unsafe fn nsstring_to_string(nsstring: id) -> String {
    let bytes: *const std::os::raw::c_char = msg_send![nsstring, UTF8String];
    if bytes.is_null() {
        return String::new();
    }
    std::ffi::CStr::from_ptr(bytes)
        .to_string_lossy()
        .into_owned()
}
