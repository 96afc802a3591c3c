use std::fmt::Debug;

use crate::Result;

/// Creates events of the backing that a platform uses.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    type Event: PlatformEvent;

    /// Creates a new event in the unsignaled state.
    fn new_event(&self) -> Result<Self::Event>;
}

/// A one-shot event as realized by a specific backing.
///
/// Dropping the event closes it and releases every resource it holds, without waiting.
#[cfg_attr(test, mockall::automock)]
pub(crate) trait PlatformEvent: Debug + Send + Sync + 'static {
    /// Transitions the event to the signaled state and wakes every waiter.
    ///
    /// Signaling an event that is already signaled wakes waiters again but has no other effect.
    fn signal(&self);

    /// Blocks the current thread until the event is signaled.
    ///
    /// Returns immediately if the event has already been signaled.
    fn wait(&self) -> Result<()>;
}
