mod ffi;
mod service;

use headphone_motion_api::{HeadphoneMotionService, HeadphoneMotionServiceCreator};

pub struct CoreMotionServiceCreator;

impl CoreMotionServiceCreator {
    pub fn new() -> Box<dyn HeadphoneMotionServiceCreator> {
        Box::new(CoreMotionServiceCreator)
    }
}

impl HeadphoneMotionServiceCreator for CoreMotionServiceCreator {
    fn new_service(&self) -> Box<dyn HeadphoneMotionService> {
        Box::new(service::CoreMotionService::new())
    }
}
