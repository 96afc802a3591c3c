#![cfg_attr(coverage_nightly, coverage(off))]

use std::fmt::{self, Debug, Formatter};
use std::io;
#[cfg(test)]
use std::sync::Arc;

use windows::Win32::Foundation::HANDLE;
use windows::core::Result;

#[cfg(test)]
use crate::pal::windows::MockBindings;
use crate::pal::windows::{Bindings, BuildTargetBindings};

/// Hide the real/mock bindings choice behind a single type.
#[derive(Clone)]
pub(crate) enum BindingsFacade {
    Target(&'static BuildTargetBindings),

    #[cfg(test)]
    Mock(Arc<MockBindings>),
}

impl BindingsFacade {
    pub(crate) const fn target() -> Self {
        Self::Target(&BuildTargetBindings)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockBindings) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Bindings for BindingsFacade {
    fn create_manual_reset_event(&self) -> Result<HANDLE> {
        match self {
            Self::Target(bindings) => bindings.create_manual_reset_event(),
            #[cfg(test)]
            Self::Mock(bindings) => bindings.create_manual_reset_event(),
        }
    }

    unsafe fn set_event(&self, event: HANDLE) -> Result<()> {
        match self {
            // SAFETY: Forwarding safety requirements to caller.
            Self::Target(bindings) => unsafe { bindings.set_event(event) },
            #[cfg(test)]
            // SAFETY: Forwarding safety requirements to caller.
            Self::Mock(bindings) => unsafe { bindings.set_event(event) },
        }
    }

    unsafe fn wait_for_single_object(&self, handle: HANDLE) -> io::Result<()> {
        match self {
            // SAFETY: Forwarding safety requirements to caller.
            Self::Target(bindings) => unsafe { bindings.wait_for_single_object(handle) },
            #[cfg(test)]
            // SAFETY: Forwarding safety requirements to caller.
            Self::Mock(bindings) => unsafe { bindings.wait_for_single_object(handle) },
        }
    }

    unsafe fn close_handle(&self, handle: HANDLE) -> Result<()> {
        match self {
            // SAFETY: Forwarding safety requirements to caller.
            Self::Target(bindings) => unsafe { bindings.close_handle(handle) },
            #[cfg(test)]
            // SAFETY: Forwarding safety requirements to caller.
            Self::Mock(bindings) => unsafe { bindings.close_handle(handle) },
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for BindingsFacade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(inner) => inner.fmt(f),
            #[cfg(test)]
            Self::Mock(inner) => inner.fmt(f),
        }
    }
}
