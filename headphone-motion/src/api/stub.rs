use headphone_motion_api::{EventDispatcherPtr, HeadphoneMotionService, HeadphoneMotionServiceCreator, ServiceKind};

pub const PLATFORM_WARNING: &str = "HeadphoneMotion is only available on iOS platform and only at runtime.";

pub struct StubServiceCreator;

impl StubServiceCreator {
    pub fn new() -> Box<dyn HeadphoneMotionServiceCreator> {
        Box::new(StubServiceCreator)
    }
}

impl HeadphoneMotionServiceCreator for StubServiceCreator {
    fn new_service(&self) -> Box<dyn HeadphoneMotionService> {
        Box::new(StubService)
    }
}

// Stands in for the native bridge where there is no headphone motion manager.
// Every call logs one warning and returns the safe default.
pub struct StubService;

impl HeadphoneMotionService for StubService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Stub
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn initialize(&mut self, _dispatcher: EventDispatcherPtr) {
        warn!("{}", PLATFORM_WARNING);
    }

    fn is_headphone_motion_available(&self) -> bool {
        warn!("{}", PLATFORM_WARNING);
        false
    }

    fn are_headphones_connected(&self) -> bool {
        warn!("{}", PLATFORM_WARNING);
        false
    }

    fn start_tracking(&mut self) -> bool {
        warn!("{}", PLATFORM_WARNING);
        false
    }

    fn stop_tracking(&mut self) -> bool {
        warn!("{}", PLATFORM_WARNING);
        false
    }
}
