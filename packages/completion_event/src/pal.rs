//! Platform Abstraction Layer (PAL). This selects the backing that realizes the event on the
//! build target and is private API.

mod abstractions;
mod facade;

pub(crate) use abstractions::*;
pub(crate) use facade::*;

#[cfg(all(windows, not(miri), not(feature = "portable")))]
mod windows;
#[cfg(all(windows, not(miri), not(feature = "portable")))]
pub(crate) use windows::*;

// The generic backing is the primary implementation on non-Windows platforms, under Miri and
// when the `portable` feature is enabled. It is also compiled in test mode on Windows, so that
// its own unit tests run there, without becoming the build target backing.
#[cfg(any(test, not(windows), miri, feature = "portable"))]
mod generic;
#[cfg(any(test, not(windows), miri, feature = "portable"))]
pub(crate) use generic::*;

#[cfg(test)]
mod mock;
#[cfg(test)]
pub(crate) use mock::*;
