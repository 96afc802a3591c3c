use std::result;

use thiserror::Error;

/// Errors that can occur when creating or waiting for a completion event.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The operating system could not allocate the native event object.
    ///
    /// No event was created. Only the native backing reports this; the portable backing
    /// allocates from the Rust heap, where allocation failure terminates the process.
    #[error("failed to create event: {message}")]
    ResourceExhaustion {
        /// A human-readable description of the problem, as reported by the operating system.
        message: String,
    },

    /// The operating system reported an abnormal result while waiting for the event.
    ///
    /// The event has still been closed and its resources released.
    #[error("failed to wait for event: {message}")]
    WaitFailed {
        /// A human-readable description of the problem, as reported by the operating system.
        message: String,
    },
}

/// A specialized `Result` type for completion event operations, returning the crate's
/// [`Error`] type as the error value.
pub type Result<T> = result::Result<T, Error>;
