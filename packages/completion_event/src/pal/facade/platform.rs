use std::fmt::{self, Debug, Formatter};
#[cfg(test)]
use std::sync::Arc;

use crate::Result;
#[cfg(test)]
use crate::pal::MockPlatform;
use crate::pal::{BUILD_TARGET_PLATFORM, BuildTargetPlatform, EventFacade, Platform};

/// Hides the real/mock platform choice behind a single type.
#[derive(Clone)]
pub(crate) enum PlatformFacade {
    Real(&'static BuildTargetPlatform),

    #[cfg(test)]
    Mock(Arc<MockPlatform>),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(&BUILD_TARGET_PLATFORM)
    }

    #[cfg(test)]
    pub(crate) fn from_mock(mock: MockPlatform) -> Self {
        Self::Mock(Arc::new(mock))
    }
}

impl Platform for PlatformFacade {
    type Event = EventFacade;

    fn new_event(&self) -> Result<EventFacade> {
        match self {
            Self::Real(platform) => platform.new_event().map(EventFacade::from),
            #[cfg(test)]
            Self::Mock(platform) => platform.new_event().map(EventFacade::from),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))] // No API contract to test.
impl Debug for PlatformFacade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(platform) => platform.fmt(f),
            #[cfg(test)]
            Self::Mock(platform) => platform.fmt(f),
        }
    }
}
