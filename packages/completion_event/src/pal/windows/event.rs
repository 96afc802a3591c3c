use std::os::windows::io::RawHandle;

use tracing::debug;
use windows::Win32::Foundation::HANDLE;

use crate::pal::PlatformEvent;
use crate::pal::windows::{Bindings, BindingsFacade};
use crate::{Error, Result};

/// Backing that realizes the event as a Windows manual-reset event object.
///
/// The kernel object provides the signaled flag and the wake broadcast, so no mutex or condition
/// variable is needed on our side. Because it is an ordinary kernel handle, it can also be waited
/// on by the Win32 thread pool or an I/O completion port without parking a thread.
#[derive(Debug)]
pub(crate) struct NativeEvent {
    // Owned by us; closed when we are dropped.
    handle: HANDLE,

    bindings: BindingsFacade,
}

impl NativeEvent {
    pub(crate) fn new(bindings: BindingsFacade) -> Result<Self> {
        let handle = bindings
            .create_manual_reset_event()
            .map_err(|e| Error::ResourceExhaustion {
                message: e.to_string(),
            })?;

        Ok(Self { handle, bindings })
    }

    pub(crate) fn native_handle(&self) -> RawHandle {
        self.handle.0
    }
}

impl PlatformEvent for NativeEvent {
    fn signal(&self) {
        // SAFETY: We own the handle and it stays open until we are dropped.
        unsafe { self.bindings.set_event(self.handle) }
            // This can only fail due to an invalid handle, which can only
            // happen due to some bug in unsafe code.
            .expect("signaling an owned event handle failed - the handle must be corrupted");
    }

    fn wait(&self) -> Result<()> {
        // SAFETY: We own the handle and it stays open until we are dropped.
        unsafe { self.bindings.wait_for_single_object(self.handle) }.map_err(|e| {
            debug!(error = %e, "waiting for native event failed; the event is closed regardless");

            Error::WaitFailed {
                message: e.to_string(),
            }
        })
    }
}

impl Drop for NativeEvent {
    fn drop(&mut self) {
        // SAFETY: We own the handle and nothing can use it after this point.
        if let Err(e) = unsafe { self.bindings.close_handle(self.handle) } {
            // Nothing useful can be done about a failed close and drop may already be running
            // on the error path of a failed wait, so we only report it.
            debug!(error = %e, "closing native event handle failed");
        }
    }
}

// SAFETY: The handle is an owned kernel object reference. Kernel event objects may be signaled,
// waited on and closed from any thread, and our API contract ensures the close happens last.
unsafe impl Send for NativeEvent {}
// SAFETY: See above. Signal and wait are both safe to call concurrently on one event object.
unsafe impl Sync for NativeEvent {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::io;
    use std::ptr;
    use std::sync::Arc;
    use std::time::Duration;

    use mockall::Sequence;
    use static_assertions::assert_impl_all;
    use testing::{start_in_background, with_watchdog};
    use windows::Win32::Foundation::{E_HANDLE, E_OUTOFMEMORY};

    use super::*;
    use crate::pal::windows::MockBindings;

    assert_impl_all!(NativeEvent: Send, Sync);

    fn fake_handle() -> HANDLE {
        HANDLE(ptr::without_provenance_mut(0x1234))
    }

    #[test]
    fn create_failure_is_reported() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_create_manual_reset_event()
            .once()
            .returning(|| Err(E_OUTOFMEMORY.into()));

        // Nothing was created, so nothing may be closed.
        bindings.expect_close_handle().never();

        let result = NativeEvent::new(BindingsFacade::from_mock(bindings));

        assert!(matches!(result, Err(Error::ResourceExhaustion { .. })));
    }

    #[test]
    fn signal_wait_close_in_order() {
        let mut bindings = MockBindings::new();
        let mut seq = Sequence::new();

        bindings
            .expect_create_manual_reset_event()
            .once()
            .in_sequence(&mut seq)
            .returning(|| Ok(fake_handle()));

        bindings
            .expect_set_event()
            .withf(|handle| *handle == fake_handle())
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        bindings
            .expect_wait_for_single_object()
            .withf(|handle| *handle == fake_handle())
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        bindings
            .expect_close_handle()
            .withf(|handle| *handle == fake_handle())
            .once()
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let event = NativeEvent::new(BindingsFacade::from_mock(bindings)).unwrap();

        event.signal();
        event.wait().unwrap();
    }

    #[test]
    fn wait_failure_is_reported_and_handle_still_closed() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_create_manual_reset_event()
            .once()
            .returning(|| Ok(fake_handle()));

        bindings
            .expect_wait_for_single_object()
            .once()
            .returning(|_| Err(io::Error::other("WaitForSingleObject returned 0xffffffff")));

        bindings
            .expect_close_handle()
            .withf(|handle| *handle == fake_handle())
            .once()
            .returning(|_| Ok(()));

        let event = NativeEvent::new(BindingsFacade::from_mock(bindings)).unwrap();

        let result = event.wait();
        drop(event);

        assert!(matches!(result, Err(Error::WaitFailed { .. })));
    }

    #[test]
    fn release_without_wait_closes_handle() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_create_manual_reset_event()
            .once()
            .returning(|| Ok(fake_handle()));

        bindings.expect_wait_for_single_object().never();

        bindings
            .expect_close_handle()
            .withf(|handle| *handle == fake_handle())
            .once()
            .returning(|_| Ok(()));

        let event = NativeEvent::new(BindingsFacade::from_mock(bindings)).unwrap();
        drop(event);
    }

    #[test]
    fn close_failure_does_not_panic() {
        let mut bindings = MockBindings::new();

        bindings
            .expect_create_manual_reset_event()
            .once()
            .returning(|| Ok(fake_handle()));

        bindings
            .expect_wait_for_single_object()
            .once()
            .returning(|_| Err(io::Error::other("WaitForSingleObject returned 0xffffffff")));

        bindings
            .expect_close_handle()
            .once()
            .returning(|_| Err(E_HANDLE.into()));

        let event = NativeEvent::new(BindingsFacade::from_mock(bindings)).unwrap();

        // The wait failure is reported and the subsequent close failure is swallowed.
        let result = event.wait();
        drop(event);

        assert!(matches!(result, Err(Error::WaitFailed { .. })));
    }

    #[test]
    fn real_signal_then_wait() {
        with_watchdog(|| {
            let event = NativeEvent::new(BindingsFacade::target()).unwrap();

            event.signal();
            event.signal();

            event.wait().unwrap();
            event.wait().unwrap();
        });
    }

    #[test]
    fn real_wait_blocks_until_signaled() {
        with_watchdog(|| {
            let event = Arc::new(NativeEvent::new(BindingsFacade::target()).unwrap());

            let waiter = start_in_background({
                let event = Arc::clone(&event);
                move || event.wait()
            });

            waiter.assert_blocked_for(Duration::from_millis(50));

            event.signal();

            waiter.join_within(Duration::from_millis(500)).unwrap();
        });
    }
}
