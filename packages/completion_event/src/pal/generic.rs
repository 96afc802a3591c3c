//! Portable backing built from a mutex-protected flag and a condition variable.

use parking_lot::{Condvar, Mutex};

use crate::Result;
use crate::pal::{Platform, PlatformEvent};

#[cfg(any(not(windows), miri, feature = "portable"))]
pub(crate) type BuildTargetPlatform = GenericPlatform;

#[cfg(any(not(windows), miri, feature = "portable"))]
pub(crate) type BuildTargetEvent = GenericEvent;

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
#[cfg(any(not(windows), miri, feature = "portable"))]
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform = GenericPlatform;

#[derive(Debug, Default)]
pub(crate) struct GenericPlatform;

impl Platform for GenericPlatform {
    type Event = GenericEvent;

    // Heap allocation failure aborts the process, so there is no failure to report here.
    fn new_event(&self) -> Result<Self::Event> {
        Ok(GenericEvent::new())
    }
}

#[derive(Debug)]
pub(crate) struct GenericEvent {
    is_signaled: Mutex<bool>,

    // Broadcasts the transition of `is_signaled` to `true`.
    signaled: Condvar,
}

impl GenericEvent {
    pub(crate) fn new() -> Self {
        Self {
            is_signaled: Mutex::new(false),
            signaled: Condvar::new(),
        }
    }
}

impl PlatformEvent for GenericEvent {
    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    fn signal(&self) {
        let mut is_signaled = self.is_signaled.lock();
        *is_signaled = true;

        // We notify while still holding the lock. A waiter can only observe the flag after we
        // release it, after which we no longer touch the event, so the waiter is free to
        // destroy the event as soon as it returns.
        self.signaled.notify_all();
    }

    #[cfg_attr(test, mutants::skip)] // Critical primitive - causes test timeouts if tampered.
    fn wait(&self) -> Result<()> {
        let mut is_signaled = self.is_signaled.lock();

        // Spurious wakeups are possible, so we always re-check the flag.
        while !*is_signaled {
            self.signaled.wait(&mut is_signaled);
        }

        Ok(())
    }
}
