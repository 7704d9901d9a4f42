//! Windows-specific foreground app detection

use super::{executable_label, non_empty, ForegroundApp, ProbeError};
use tracing::debug;
use windows::Win32::Foundation::{CloseHandle, MAX_PATH};
use windows::Win32::System::ProcessStatus::K32GetProcessImageFileNameW;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId,
};

pub fn foreground_app() -> Result<ForegroundApp, ProbeError> {
    unsafe {
        let hwnd = GetForegroundWindow();
        if hwnd.0 == 0 {
            return Err(ProbeError::NoForegroundWindow);
        }

        // Get the window title
        let len = GetWindowTextLengthW(hwnd).max(0) as usize;
        let mut title_buf = vec![0u16; len + 1];
        let copied = GetWindowTextW(hwnd, &mut title_buf).max(0) as usize;
        let title = String::from_utf16_lossy(&title_buf[..copied.min(len)]);

        // Get the process ID
        let mut process_id = 0u32;
        GetWindowThreadProcessId(hwnd, Some(&mut process_id));

        let executable = image_path(process_id).and_then(|path| executable_label(&path));

        Ok(ForegroundApp {
            title: non_empty(title),
            executable,
        })
    }
}

/// Full image path of a process, `None` if it cannot be opened or queried
fn image_path(process_id: u32) -> Option<String> {
    unsafe {
        let handle = match OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, process_id) {
            Ok(handle) => handle,
            Err(e) => {
                debug!(process_id, error = %e, "OpenProcess failed");
                return None;
            }
        };

        let mut path_buf = [0u16; MAX_PATH as usize];
        let len = K32GetProcessImageFileNameW(handle, &mut path_buf) as usize;
        let _ = CloseHandle(handle);

        if len == 0 {
            debug!(process_id, "GetProcessImageFileName returned nothing");
            return None;
        }
        Some(String::from_utf16_lossy(&path_buf[..len.min(path_buf.len())]))
    }
}
