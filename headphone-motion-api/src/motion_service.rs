use crate::EventDispatcherPtr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum ServiceKind {
    // Native headphone motion manager, iOS only.
    CoreMotion,
    // Unsupported platform. Every call warns and returns a default.
    Stub,
    // In-process simulation driven by control messages.
    Mock,
}

pub trait HeadphoneMotionService: Send {
    fn kind(&self) -> ServiceKind;

    // Whether this service talks to a real motion manager on this platform.
    fn is_supported(&self) -> bool;

    // Registers the native callbacks. Native notifications are republished
    // through `dispatcher` from then on. Calling it again re-registers.
    fn initialize(&mut self, dispatcher: EventDispatcherPtr);

    // Detaches the dispatcher handed to `initialize`.
    fn release(&mut self) {}

    fn is_headphone_motion_available(&self) -> bool;

    fn are_headphones_connected(&self) -> bool;

    fn start_tracking(&mut self) -> bool;

    fn stop_tracking(&mut self) -> bool;
}

pub trait HeadphoneMotionServiceCreator {
    fn new_service(&self) -> Box<dyn HeadphoneMotionService>;
}
