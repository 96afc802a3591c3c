use std::io;

use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{CreateEventW, INFINITE, SetEvent, WaitForSingleObject};
use windows::core::{PCWSTR, Result};

use crate::pal::windows::Bindings;

/// FFI bindings that target the real operating system that the build is targeting.
///
/// You would only use different bindings in PAL unit tests that need to use mock bindings.
/// Even then, whenever possible, unit tests should use real bindings for maximum realism.
#[derive(Debug, Default)]
pub(crate) struct BuildTargetBindings;

// Real OS bindings are excluded from coverage measurement because the error paths require
// OS-level failures that are impractical to trigger in tests.
#[cfg_attr(coverage_nightly, coverage(off))]
impl Bindings for BuildTargetBindings {
    fn create_manual_reset_event(&self) -> Result<HANDLE> {
        // SAFETY: No safety requirements beyond passing valid arguments. We request default
        // security, manual reset, unsignaled initial state and no name.
        unsafe { CreateEventW(None, true, false, PCWSTR::null()) }
    }

    unsafe fn set_event(&self, event: HANDLE) -> Result<()> {
        // SAFETY: Forwarding safety requirements to caller.
        unsafe { SetEvent(event) }
    }

    unsafe fn wait_for_single_object(&self, handle: HANDLE) -> io::Result<()> {
        // SAFETY: Forwarding safety requirements to caller.
        let result = unsafe { WaitForSingleObject(handle, INFINITE) };

        if result == WAIT_OBJECT_0 {
            Ok(())
        } else {
            let os_error = io::Error::last_os_error();

            Err(io::Error::other(format!(
                "WaitForSingleObject returned {:#x}: {os_error}",
                result.0
            )))
        }
    }

    unsafe fn close_handle(&self, handle: HANDLE) -> Result<()> {
        // SAFETY: Forwarding safety requirements to caller.
        unsafe { CloseHandle(handle) }
    }
}
