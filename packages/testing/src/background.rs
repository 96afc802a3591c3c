use std::any::type_name;
use std::fmt::{self, Debug, Formatter};
use std::panic;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// An operation running on a dedicated background thread, which the test can observe to verify
/// that it blocks (or stops blocking) at the right time.
///
/// Created via [`start_in_background()`].
pub struct BackgroundOperation<R> {
    result_rx: mpsc::Receiver<R>,
    thread: JoinHandle<()>,
}

impl<R> Debug for BackgroundOperation<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("thread", &self.thread)
            .finish_non_exhaustive()
    }
}

/// Starts `operation` on a new thread, returning a handle that can be used to check whether it
/// is still blocked and to collect its result.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use testing::start_in_background;
///
/// let operation = start_in_background(|| 42);
/// assert_eq!(operation.join_within(Duration::from_secs(5)), 42);
/// ```
#[must_use]
pub fn start_in_background<F, R>(operation: F) -> BackgroundOperation<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    let (result_tx, result_rx) = mpsc::channel();

    let thread = thread::spawn(move || {
        // If the receiver is gone, the test has already failed and nobody cares about the result.
        drop(result_tx.send(operation()));
    });

    BackgroundOperation { result_rx, thread }
}

impl<R> BackgroundOperation<R> {
    /// Asserts that the operation does not complete within `duration`.
    ///
    /// # Panics
    ///
    /// Panics if the operation completes (or panics) before `duration` has elapsed.
    pub fn assert_blocked_for(&self, duration: Duration) {
        match self.result_rx.recv_timeout(duration) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(_) => panic!(
                "operation completed in less than {duration:?} but was expected to still be blocked"
            ),
            Err(RecvTimeoutError::Disconnected) => {
                panic!("operation panicked while it was expected to be blocked")
            }
        }
    }

    /// Waits for the operation to complete and returns its result.
    ///
    /// # Panics
    ///
    /// Panics if the operation does not complete within `timeout`. If the operation itself
    /// panicked, the panic is propagated to the caller.
    #[must_use]
    pub fn join_within(self, timeout: Duration) -> R {
        match self.result_rx.recv_timeout(timeout) {
            Ok(result) => {
                self.thread
                    .join()
                    .expect("operation thread cannot panic after producing a result");
                result
            }
            Err(RecvTimeoutError::Timeout) => {
                panic!("operation did not complete within {timeout:?}")
            }
            Err(RecvTimeoutError::Disconnected) => match self.thread.join() {
                Ok(()) => panic!("operation thread disconnected unexpectedly"),
                Err(e) => panic::resume_unwind(e),
            },
        }
    }
}

/// Runs `operation` on a background thread and asserts that it completes within `timeout`.
///
/// # Panics
///
/// Panics if the operation takes longer than `timeout`. If the operation itself panicked, the
/// panic is propagated to the caller.
pub fn assert_returns_within<F, R>(timeout: Duration, operation: F) -> R
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    start_in_background(operation).join_within(timeout)
}
