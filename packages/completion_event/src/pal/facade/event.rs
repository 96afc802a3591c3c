use std::fmt::{self, Debug, Formatter};
#[cfg(all(windows, not(miri), not(feature = "portable")))]
use std::os::windows::io::RawHandle;

use crate::Result;
#[cfg(test)]
use crate::pal::MockPlatformEvent;
use crate::pal::{BuildTargetEvent, PlatformEvent};

/// Hides the choice between the build target backing and a mock event behind a single type.
pub(crate) enum EventFacade {
    Target(BuildTargetEvent),

    #[cfg(test)]
    Mock(MockPlatformEvent),
}

#[cfg(all(windows, not(miri), not(feature = "portable")))]
impl EventFacade {
    /// The kernel handle of the native event object, still owned by the event.
    pub(crate) fn native_handle(&self) -> RawHandle {
        match self {
            Self::Target(event) => event.native_handle(),
            #[cfg(test)]
            Self::Mock(_) => panic!("mock events are not backed by a kernel object"),
        }
    }
}

impl PlatformEvent for EventFacade {
    fn signal(&self) {
        match self {
            Self::Target(event) => event.signal(),
            #[cfg(test)]
            Self::Mock(event) => event.signal(),
        }
    }

    fn wait(&self) -> Result<()> {
        match self {
            Self::Target(event) => event.wait(),
            #[cfg(test)]
            Self::Mock(event) => event.wait(),
        }
    }
}

impl From<BuildTargetEvent> for EventFacade {
    fn from(event: BuildTargetEvent) -> Self {
        Self::Target(event)
    }
}

#[cfg(test)]
impl From<MockPlatformEvent> for EventFacade {
    fn from(event: MockPlatformEvent) -> Self {
        Self::Mock(event)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for EventFacade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Target(event) => event.fmt(f),
            #[cfg(test)]
            Self::Mock(event) => event.fmt(f),
        }
    }
}
