mod bindings;
mod event;
mod platform;

use bindings::*;
pub(crate) use event::*;
pub(crate) use platform::*;
