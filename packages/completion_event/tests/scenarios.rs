//! End-to-end scenarios that exercise the public API with real threads and the backing selected
//! for the build target.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use completion_event::{CompletionEvent, raw};
use testing::{assert_returns_within, start_in_background, with_watchdog};

const SIGNAL_DELAY: Duration = Duration::from_millis(50);
const WAKE_WITHIN: Duration = Duration::from_millis(500);

#[cfg_attr(miri, ignore = "timing-sensitive, Miri is too slow")]
#[test]
fn waiter_is_released_by_later_signal() {
    with_watchdog(|| {
        let event = CompletionEvent::new().unwrap();
        let signaler = event.signaler();

        let waiter = start_in_background(move || {
            let result = event.wait_and_close();
            (result, Instant::now())
        });

        // The waiter must still be blocked because nobody has signaled yet.
        waiter.assert_blocked_for(SIGNAL_DELAY);

        let signaled_at = Instant::now();
        signaler.signal();

        let (result, returned_at) = waiter.join_within(WAKE_WITHIN);
        result.unwrap();

        assert!(returned_at >= signaled_at);
        assert!(returned_at.duration_since(signaled_at) < WAKE_WITHIN);
    });
}

#[test]
fn signal_before_wait_is_not_lost() {
    with_watchdog(|| {
        let event = CompletionEvent::new().unwrap();
        event.signal();

        assert_returns_within(WAKE_WITHIN, move || event.wait_and_close()).unwrap();
    });
}

#[test]
fn repeated_signals_still_complete_once() {
    with_watchdog(|| {
        let event = CompletionEvent::new().unwrap();
        let signaler = event.signaler();

        event.signal();
        signaler.signal();
        signaler.signal();

        assert_returns_within(WAKE_WITHIN, move || event.wait_and_close()).unwrap();
    });
}

#[test]
fn abandoned_event_is_released_without_blocking() {
    with_watchdog(|| {
        let event = CompletionEvent::new().unwrap();

        assert_returns_within(WAKE_WITHIN, move || event.release());

        let handle = raw::create().unwrap();

        assert_returns_within(WAKE_WITHIN, move || {
            // SAFETY: The handle is valid and not used afterwards.
            unsafe {
                raw::release(Some(handle));
            }
        });
    });
}

#[test]
fn work_result_is_visible_after_completion() {
    with_watchdog(|| {
        let results = Arc::new(Mutex::new(Vec::new()));

        let events = (0..8)
            .map(|index| {
                let event = CompletionEvent::new().unwrap();
                let signaler = event.signaler();
                let results = Arc::clone(&results);

                thread::spawn(move || {
                    results.lock().unwrap().push(index);
                    signaler.signal();
                });

                event
            })
            .collect::<Vec<_>>();

        for event in events {
            event.wait_and_close().unwrap();
        }

        let mut results = results.lock().unwrap().clone();
        results.sort_unstable();

        assert_eq!(results, (0..8).collect::<Vec<_>>());
    });
}

#[cfg(all(windows, not(miri), not(feature = "portable")))]
#[test]
fn native_handle_is_signaled_kernel_object() {
    use std::os::windows::io::AsRawHandle;

    use windows::Win32::Foundation::{HANDLE, WAIT_OBJECT_0, WAIT_TIMEOUT};
    use windows::Win32::System::Threading::WaitForSingleObject;

    with_watchdog(|| {
        let event = CompletionEvent::new().unwrap();
        let handle = HANDLE(event.as_raw_handle());

        // SAFETY: The handle is owned by the event, which outlives this call.
        assert_eq!(unsafe { WaitForSingleObject(handle, 0) }, WAIT_TIMEOUT);

        event.signal();

        // SAFETY: The handle is owned by the event, which outlives this call.
        assert_eq!(unsafe { WaitForSingleObject(handle, 0) }, WAIT_OBJECT_0);

        event.wait_and_close().unwrap();
    });
}
