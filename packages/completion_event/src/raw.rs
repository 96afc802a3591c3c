//! Handle-based operations for host runtimes that manage event lifetimes themselves.
//!
//! An [`EventHandle`] is a copyable, opaque handle to a heap-allocated event. It performs no
//! reference counting and no validity checking: the caller is responsible for calling exactly
//! one of [`wait_and_close()`] or [`release()`] for every handle returned by [`create()`], and
//! for never using the handle again afterwards.
//!
//! Prefer [`CompletionEvent`][crate::CompletionEvent], which enforces these rules at compile
//! time, unless the handle must cross a boundary where Rust ownership cannot follow it.
//!
//! # Example
//!
//! ```rust
//! use completion_event::raw;
//!
//! let event = raw::create().unwrap();
//!
//! // SAFETY: The handle is valid and is not used after wait_and_close().
//! unsafe {
//!     raw::signal(event);
//!     raw::wait_and_close(event).unwrap();
//! }
//! ```

use std::ptr::NonNull;

use tracing::trace;

use crate::Result;
use crate::pal::{EventFacade, Platform, PlatformEvent, PlatformFacade};

/// Opaque handle to an event created by [`create()`].
///
/// The handle is valid from creation until it is passed to [`wait_and_close()`] or
/// [`release()`]. Copies of the handle all refer to the same event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EventHandle {
    event: NonNull<EventFacade>,
}

// SAFETY: The event behind the handle is `Send + Sync`; whether a particular use of the handle
// is valid is governed by the safety contracts of the functions in this module.
unsafe impl Send for EventHandle {}
// SAFETY: See above.
unsafe impl Sync for EventHandle {}

impl EventHandle {
    /// Returns the address of the event, for use as an opaque token across an FFI boundary.
    #[must_use]
    pub fn into_ptr(self) -> *mut () {
        self.event.as_ptr().cast()
    }

    /// Reconstructs a handle from the token returned by [`into_ptr()`][Self::into_ptr].
    ///
    /// Returns [`None`] if `ptr` is null.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must have been returned by [`into_ptr()`][Self::into_ptr] for a handle
    /// that has not yet been destroyed.
    #[must_use]
    pub unsafe fn from_ptr(ptr: *mut ()) -> Option<Self> {
        NonNull::new(ptr.cast::<EventFacade>()).map(|event| Self { event })
    }
}

/// Creates a new event in the unsignaled state.
///
/// The returned handle must eventually be passed to exactly one of [`wait_and_close()`] or
/// [`release()`], otherwise the event is leaked.
///
/// # Errors
///
/// Returns [`Error::ResourceExhaustion`][crate::Error::ResourceExhaustion] if the operating
/// system cannot allocate the native event object. No handle is created in that case.
pub fn create() -> Result<EventHandle> {
    create_with(&PlatformFacade::real())
}

pub(crate) fn create_with(pal: &PlatformFacade) -> Result<EventHandle> {
    let event = Box::new(pal.new_event()?);

    trace!("raw completion event created");

    Ok(EventHandle {
        event: NonNull::from(Box::leak(event)),
    })
}

/// Transitions the event to the signaled state and wakes every waiter.
///
/// Signaling an event that is already signaled has no effect on its state.
///
/// # Safety
///
/// The handle must not have been destroyed and must not be destroyed while this call is in
/// progress.
pub unsafe fn signal(event: EventHandle) {
    // SAFETY: The caller guarantees that the event is alive for the duration of the call.
    let event = unsafe { event.event.as_ref() };

    event.signal();
}

/// Blocks the current thread until the event is signaled, then destroys it.
///
/// There is no timeout: if the event is never signaled, this blocks forever.
///
/// # Errors
///
/// Returns [`Error::WaitFailed`][crate::Error::WaitFailed] if the operating system reports an
/// abnormal result from the wait. The event is destroyed in either case.
///
/// # Safety
///
/// The handle must not have been destroyed. It is destroyed by this call and must not be used
/// again, even if an error is returned. Other threads may signal the event while this call is
/// waiting, and a [`signal()`] call that woke the waiter may still be returning when the event is
/// destroyed. No operation on the handle may start after the wait has completed.
pub unsafe fn wait_and_close(event: EventHandle) -> Result<()> {
    // We only wait through a shared reference, as signalers on other threads
    // may be holding their own shared references until the event is signaled.
    //
    // SAFETY: The caller guarantees that the event is alive.
    let result = unsafe { event.event.as_ref() }.wait();

    // SAFETY: The caller guarantees that nothing else is using the event once the wait is over,
    // so we can reclaim the box that `create_with()` leaked.
    drop(unsafe { Box::from_raw(event.event.as_ptr()) });

    trace!("raw completion event closed");

    result
}

/// Destroys the event without waiting for it to be signaled.
///
/// Passing [`None`] is allowed and does nothing.
///
/// # Safety
///
/// The handle must not have been destroyed and must not be used again. No other operation on
/// the handle may be in progress.
pub unsafe fn release(event: Option<EventHandle>) {
    let Some(event) = event else {
        return;
    };

    // SAFETY: The caller guarantees exclusive access to a live event,
    // so we can reclaim the box that `create_with()` leaked.
    drop(unsafe { Box::from_raw(event.event.as_ptr()) });

    trace!("raw completion event released");
}
