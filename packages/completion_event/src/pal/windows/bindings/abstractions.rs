use std::fmt::Debug;
use std::io;

use windows::Win32::Foundation::HANDLE;
use windows::core::Result;

/// Bindings for FFI calls into external libraries (either provided by operating system or not).
///
/// All PAL FFI calls must go through this trait, enabling them to be mocked.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait Bindings: Debug + Send + Sync + 'static {
    /// `CreateEventW()` for an unnamed manual-reset event that starts unsignaled.
    fn create_manual_reset_event(&self) -> Result<HANDLE>;

    /// `SetEvent()`
    ///
    /// # Safety
    ///
    /// The handle must be a valid event handle that remains open for the duration of the call.
    unsafe fn set_event(&self, event: HANDLE) -> Result<()>;

    /// `WaitForSingleObject()` without a timeout.
    ///
    /// Returns an error if the wait ends with anything other than `WAIT_OBJECT_0`.
    ///
    /// # Safety
    ///
    /// The handle must be a valid event handle that remains open for the duration of the call.
    unsafe fn wait_for_single_object(&self, handle: HANDLE) -> io::Result<()>;

    /// `CloseHandle()`
    ///
    /// # Safety
    ///
    /// The handle must be a valid handle owned by the caller. It must not be used after this call.
    unsafe fn close_handle(&self, handle: HANDLE) -> Result<()>;
}
