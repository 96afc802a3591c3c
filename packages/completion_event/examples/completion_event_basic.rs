//! Example used in crate-level documentation. See docs for description.

use std::thread;
use std::time::Duration;

use completion_event::CompletionEvent;

fn main() {
    let event =
        CompletionEvent::new().expect("event creation only fails under resource exhaustion");
    let signaler = event.signaler();

    thread::spawn(move || {
        println!("Worker: doing some work...");
        thread::sleep(Duration::from_millis(100));

        println!("Worker: done, signaling completion");
        signaler.signal();
    });

    println!("Main: waiting for the worker");
    event
        .wait_and_close()
        .expect("waiting only fails if the operating system reports an error");

    println!("Main: worker has completed");
}
