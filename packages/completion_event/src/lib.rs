#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A one-shot completion signal for coordinating threads.
//!
//! A [`CompletionEvent`] starts unsignaled and can be signaled exactly once, after which it stays
//! signaled until it is closed. It is meant for the case where one thread must block until
//! another thread announces that a unit of work is complete.
//!
//! The event carries no payload and cannot be reset, re-armed or waited on with a timeout.
//!
//! # Backings
//!
//! The event is realized by one of two backings, selected at build time:
//!
//! * On Windows, a native manual-reset event object. The kernel handle can be handed to the
//!   Win32 thread pool or an I/O completion port so that waiting does not occupy a pool worker
//!   (see the `AsHandle` implementation on [`CompletionEvent`]).
//! * Everywhere else (and on Windows when the `portable` feature is enabled), a mutex-protected
//!   flag paired with a condition variable.
//!
//! Both backings offer the same operations and the same guarantees.
//!
//! # Example
//!
//! ```rust
//! use std::thread;
//!
//! use completion_event::CompletionEvent;
//!
//! let event = CompletionEvent::new().unwrap();
//! let signaler = event.signaler();
//!
//! let worker = thread::spawn(move || {
//!     // Do some work here, then announce that it is done.
//!     signaler.signal();
//! });
//!
//! // Blocks until the worker has signaled, then releases the event.
//! event.wait_and_close().unwrap();
//!
//! worker.join().unwrap();
//! ```
//!
//! # Handle-based operation
//!
//! Host runtimes that manage handle lifetimes on their own (e.g. across an FFI boundary) can use
//! the [`raw`] module, which exposes the same operations on a copyable [`raw::EventHandle`]
//! with the ownership rules moved into `# Safety` contracts.

mod error;
mod event;
mod pal;
pub mod raw;

pub use error::*;
pub use event::*;
