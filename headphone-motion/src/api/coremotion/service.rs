use super::ffi;
use crate::bridge;
use headphone_motion_api::{EventDispatcherPtr, HeadphoneMotionService, ServiceKind};

pub struct CoreMotionService {
    dispatcher: Option<EventDispatcherPtr>,
}

impl CoreMotionService {
    pub fn new() -> CoreMotionService {
        CoreMotionService {
            dispatcher: None,
        }
    }
}

impl HeadphoneMotionService for CoreMotionService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::CoreMotion
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self, dispatcher: EventDispatcherPtr) {
        // Install the target before the delegates so no early callback is lost.
        bridge::install(dispatcher.clone());
        unsafe {
            ffi::setHeadphoneConnectionDelegate(bridge::headphone_connection_changed);
            ffi::setRotationDelegate(bridge::rotation_updated);
        }
        self.dispatcher = Some(dispatcher);
        debug!("Registered headphone motion delegates");
    }

    fn release(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            bridge::uninstall(&dispatcher);
        }
    }

    fn is_headphone_motion_available(&self) -> bool {
        unsafe { ffi::isHeadphoneMotionAvailable() }
    }

    fn are_headphones_connected(&self) -> bool {
        unsafe { ffi::areHeadphonesConnected() }
    }

    fn start_tracking(&mut self) -> bool {
        unsafe { ffi::startTracking() }
    }

    fn stop_tracking(&mut self) -> bool {
        unsafe { ffi::stopTracking() }
    }
}

impl Drop for CoreMotionService {
    fn drop(&mut self) {
        self.release();
    }
}
