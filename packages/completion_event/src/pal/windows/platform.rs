use crate::Result;
use crate::pal::Platform;
use crate::pal::windows::{BindingsFacade, NativeEvent};

pub(crate) type BuildTargetEvent = NativeEvent;

/// Singleton instance of `BuildTargetPlatform`, used by public API types
/// to hook up to the correct PAL implementation.
pub(crate) static BUILD_TARGET_PLATFORM: BuildTargetPlatform =
    BuildTargetPlatform::new(BindingsFacade::target());

#[derive(Debug)]
pub(crate) struct BuildTargetPlatform {
    bindings: BindingsFacade,
}

impl BuildTargetPlatform {
    // Only executed in const context.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub(crate) const fn new(bindings: BindingsFacade) -> Self {
        Self { bindings }
    }
}

impl Platform for BuildTargetPlatform {
    type Event = NativeEvent;

    fn new_event(&self) -> Result<Self::Event> {
        NativeEvent::new(self.bindings.clone())
    }
}
