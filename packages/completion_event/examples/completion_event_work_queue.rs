//! Submits a batch of work items to a set of worker threads and waits for each item to complete,
//! one completion event per work item.
//!
//! The event lifecycle is traced to stdout.
#![expect(
    clippy::arithmetic_side_effects,
    reason = "this is example code that does not need production-level safety"
)]

use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use completion_event::{CompletionEvent, Signaler};
use tracing::{Level, info};

const WORKER_COUNT: usize = 3;
const WORK_ITEM_COUNT: u64 = 6;

struct WorkItem {
    id: u64,
    done: Signaler,
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_thread_names(true)
        .init();

    let (work_tx, work_rx) = mpsc::channel::<WorkItem>();
    let work_rx = Arc::new(Mutex::new(work_rx));

    let workers = (0..WORKER_COUNT)
        .map(|index| {
            let work_rx = Arc::clone(&work_rx);

            thread::Builder::new()
                .name(format!("worker-{index}"))
                .spawn(move || {
                    loop {
                        let item = {
                            let work_rx = work_rx
                                .lock()
                                .expect("no worker panics while holding the lock");
                            work_rx.recv()
                        };

                        let Ok(item) = item else {
                            // The sender is gone, so there is no more work.
                            break;
                        };

                        thread::sleep(Duration::from_millis(10 * item.id));
                        info!(id = item.id, "work item completed");

                        item.done.signal();
                    }
                })
                .expect("failed to spawn worker thread")
        })
        .collect::<Vec<_>>();

    let events = (0..WORK_ITEM_COUNT)
        .map(|id| {
            let event = CompletionEvent::new()
                .expect("event creation only fails under resource exhaustion");

            work_tx
                .send(WorkItem {
                    id,
                    done: event.signaler(),
                })
                .expect("workers are alive until the sender is dropped");

            (id, event)
        })
        .collect::<Vec<_>>();

    drop(work_tx);

    for (id, event) in events {
        event
            .wait_and_close()
            .expect("waiting only fails if the operating system reports an error");

        info!(id, "observed completion of work item");
    }

    for worker in workers {
        worker.join().expect("worker thread panicked");
    }
}
