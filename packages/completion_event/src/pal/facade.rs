mod event;
mod platform;

pub(crate) use event::*;
pub(crate) use platform::*;
