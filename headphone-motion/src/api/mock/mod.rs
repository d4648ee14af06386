mod service;

use headphone_motion_api::mock::MockMotionInit;
use headphone_motion_api::{HeadphoneMotionService, HeadphoneMotionServiceCreator};

pub use self::service::{MockMotionService, MockRemote};

pub struct MockServiceCreator {
    init: MockMotionInit,
}

impl MockServiceCreator {
    pub fn new() -> Box<dyn HeadphoneMotionServiceCreator> {
        MockServiceCreator::with_init(MockMotionInit::default())
    }

    pub fn with_init(init: MockMotionInit) -> Box<dyn HeadphoneMotionServiceCreator> {
        Box::new(MockServiceCreator { init })
    }

    // The returned remote stands in for the headphones: connection changes and
    // rotation samples sent through it reach the service on its motion thread.
    pub fn new_service_with_remote(init: MockMotionInit) -> (Box<dyn HeadphoneMotionService>, MockRemote) {
        let service = MockMotionService::new(init);
        let remote = service.remote();
        (Box::new(service), remote)
    }
}

impl HeadphoneMotionServiceCreator for MockServiceCreator {
    fn new_service(&self) -> Box<dyn HeadphoneMotionService> {
        Box::new(MockMotionService::new(self.init))
    }
}
