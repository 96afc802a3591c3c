#[cfg(all(windows, not(miri), not(feature = "portable")))]
use std::os::windows::io::{AsHandle, AsRawHandle, BorrowedHandle, RawHandle};
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::Result;
use crate::pal::{EventFacade, Platform, PlatformEvent, PlatformFacade};

/// A one-shot event that one thread waits on until another thread signals completion.
///
/// The event starts unsignaled. Signaling it (via [`signal()`][Self::signal] or a
/// [`Signaler`]) transitions it to signaled, where it stays until closed. Signaling again has
/// no further effect. There is no way to reset the event.
///
/// The event has exactly one owner, which is the only party that can wait for it. Waiting and
/// closing is a single operation, [`wait_and_close()`][Self::wait_and_close], which consumes
/// the event. To abandon the event without waiting, call [`release()`][Self::release] or simply
/// drop it.
///
/// Other threads signal the event through a [`Signaler`], obtained from
/// [`signaler()`][Self::signaler].
///
/// # Example
///
/// ```rust
/// use completion_event::CompletionEvent;
///
/// let event = CompletionEvent::new().unwrap();
///
/// // A signal issued before the wait is not lost; the wait returns immediately.
/// event.signal();
/// event.wait_and_close().unwrap();
/// ```
#[derive(Debug)]
pub struct CompletionEvent {
    inner: Arc<EventFacade>,
}

impl CompletionEvent {
    /// Creates a new event in the unsignaled state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResourceExhaustion`][crate::Error::ResourceExhaustion] if the operating
    /// system cannot allocate the native event object.
    pub fn new() -> Result<Self> {
        Self::from_pal(&PlatformFacade::real())
    }

    pub(crate) fn from_pal(pal: &PlatformFacade) -> Result<Self> {
        let inner = pal.new_event()?;

        trace!("completion event created");

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Returns a signal-only endpoint that can be moved to the thread that completes the work.
    ///
    /// Any number of signalers can be created. A signaler cannot wait for or close the event
    /// and does not keep it open: once the owner closes the event, signaling has no effect.
    #[must_use]
    pub fn signaler(&self) -> Signaler {
        Signaler {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Transitions the event to the signaled state and wakes every waiter.
    ///
    /// Signaling an event that is already signaled has no effect on its state.
    pub fn signal(&self) {
        self.inner.signal();
    }

    /// Blocks the current thread until the event is signaled, then closes it.
    ///
    /// Returns immediately if the event was signaled before this call. There is no timeout:
    /// if the event is never signaled, this blocks forever.
    ///
    /// All memory writes performed by the signaling thread before signaling are visible to
    /// the current thread after this returns successfully.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WaitFailed`][crate::Error::WaitFailed] if the operating system reports
    /// an abnormal result from the wait. The event is closed in either case.
    pub fn wait_and_close(self) -> Result<()> {
        self.inner.wait()

        // `self` is dropped here, closing the event on both the success and the failure path.
    }

    /// Closes the event without waiting for it to be signaled.
    ///
    /// This is equivalent to dropping the event and exists to make abandonment explicit on
    /// error paths.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for CompletionEvent {
    fn drop(&mut self) {
        trace!("completion event closed");
    }
}

#[cfg(all(windows, not(miri), not(feature = "portable")))]
impl AsRawHandle for CompletionEvent {
    /// Returns the kernel handle of the native event object.
    ///
    /// The handle can be registered with a thread pool wait (e.g. `SetThreadpoolWait()`) or
    /// waited on together with other kernel objects. It remains owned by the event and becomes
    /// invalid once the event is closed.
    fn as_raw_handle(&self) -> RawHandle {
        self.inner.native_handle()
    }
}

#[cfg(all(windows, not(miri), not(feature = "portable")))]
impl AsHandle for CompletionEvent {
    fn as_handle(&self) -> BorrowedHandle<'_> {
        // SAFETY: The handle is open for as long as `self` is alive, which the lifetime of the
        // returned value is bound to.
        unsafe { BorrowedHandle::borrow_raw(self.as_raw_handle()) }
    }
}

/// Signals a [`CompletionEvent`] from any thread.
///
/// Obtained from [`CompletionEvent::signaler()`]. Signalers can be cloned and moved freely.
///
/// # Example
///
/// ```rust
/// use std::thread;
///
/// use completion_event::CompletionEvent;
///
/// let event = CompletionEvent::new().unwrap();
/// let signaler = event.signaler();
///
/// thread::spawn(move || signaler.signal());
///
/// event.wait_and_close().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Signaler {
    inner: Weak<EventFacade>,
}

impl Signaler {
    /// Transitions the event to the signaled state and wakes every waiter.
    ///
    /// Signaling an event that is already signaled (or already closed by its owner) has no
    /// effect on its state.
    pub fn signal(&self) {
        // If the owner closes the event while we are signaling, the backing is destroyed when
        // we drop our upgraded reference.
        if let Some(inner) = self.inner.upgrade() {
            inner.signal();
        }
    }
}
