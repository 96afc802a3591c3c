#![cfg_attr(coverage_nightly, coverage(off))]

use mockall::mock;

use crate::Result;
use crate::pal::{MockPlatformEvent, Platform};

mock! {
    #[derive(Debug)]
    pub Platform {
    }

    impl Platform for Platform {
        type Event = MockPlatformEvent;

        fn new_event(&self) -> Result<MockPlatformEvent>;
    }
}
