use crate::api;
use crate::bridge;
use headphone_motion_api::{EventDispatcher, EventDispatcherPtr, HeadRotation, HeadphoneMotionEvent};
use headphone_motion_api::{HeadphoneMotionService, HeadphoneMotionServiceCreator, RotationSample};
use headphone_motion_api::{ServiceKind, SubscriptionId};
use std::sync::mpsc::{channel, Receiver};

/// Entry point for headphone motion tracking.
///
/// Owns the service talking to the motion manager and the registry that
/// native notifications are republished through. Listeners registered here
/// are called on the thread that delivers the native callback, so they must
/// be quick and must not block.
///
/// Call [`HeadphoneMotion::init`] before anything else, and subscribe before
/// [`HeadphoneMotion::start_tracking`] to catch the initial connection
/// notification.
pub struct HeadphoneMotion {
    initialized: bool,
    service: Box<dyn HeadphoneMotionService>,
    dispatcher: EventDispatcherPtr,
    poll_queue: Option<Receiver<HeadphoneMotionEvent>>,
}

impl HeadphoneMotion {
    // Uses the native service when the platform has one, the stub otherwise.
    pub fn new() -> HeadphoneMotion {
        HeadphoneMotion::with_service(api::default_service())
    }

    pub fn with_creator(creator: &dyn HeadphoneMotionServiceCreator) -> HeadphoneMotion {
        HeadphoneMotion::with_service(creator.new_service())
    }

    pub fn with_service(service: Box<dyn HeadphoneMotionService>) -> HeadphoneMotion {
        debug!("Using {:?} headphone motion service", service.kind());
        HeadphoneMotion {
            initialized: false,
            service,
            dispatcher: EventDispatcher::new(),
            poll_queue: None,
        }
    }

    // Registers the native callbacks. Safe to call again; the same callbacks
    // are registered a second time.
    pub fn init(&mut self) {
        if self.initialized {
            debug!("HeadphoneMotion already initialized, registering callbacks again");
        }
        self.service.initialize(self.dispatcher.clone());
        self.initialized = true;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // False once another context has called `init`, or before this one has.
    pub fn is_receiving_callbacks(&self) -> bool {
        bridge::is_installed(&self.dispatcher)
    }

    pub fn service_kind(&self) -> ServiceKind {
        self.service.kind()
    }

    pub fn is_supported(&self) -> bool {
        self.service.is_supported()
    }

    pub fn is_headphone_motion_available(&self) -> bool {
        self.service.is_headphone_motion_available()
    }

    pub fn are_headphones_connected(&self) -> bool {
        self.service.are_headphones_connected()
    }

    // Asks the motion manager to start reporting connection changes and
    // rotations. Returns what the motion manager answered.
    pub fn start_tracking(&mut self) -> bool {
        self.service.start_tracking()
    }

    pub fn stop_tracking(&mut self) -> bool {
        self.service.stop_tracking()
    }

    pub fn on_connection_changed<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(bool) + Send + Sync + 'static
    {
        self.dispatcher.subscribe_connection(listener)
    }

    // Unconverted CMQuaternion values. Called before the converted listeners.
    pub fn on_head_rotation_raw<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(RotationSample) + Send + Sync + 'static
    {
        self.dispatcher.subscribe_raw_rotation(listener)
    }

    pub fn on_head_rotation<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(HeadRotation) + Send + Sync + 'static
    {
        self.dispatcher.subscribe_rotation(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    // Receives every notification as a message, for consumers that handle
    // them on their own thread. Dropping the receiver ends the subscription.
    pub fn event_channel(&self) -> Receiver<HeadphoneMotionEvent> {
        let (tx, rx) = channel();
        self.dispatcher.subscribe_channel(tx);
        rx
    }

    // Drains notifications queued since the previous call. The queue is
    // created by the first call, so that call returns nothing. It is unbounded:
    // poll regularly, or call `stop_polling` when done.
    pub fn poll_events(&mut self) -> Vec<HeadphoneMotionEvent> {
        if self.poll_queue.is_none() {
            self.poll_queue = Some(self.event_channel());
        }
        match self.poll_queue {
            Some(ref queue) => queue.try_iter().collect(),
            None => Vec::new(),
        }
    }

    // Drops the polling queue and whatever it still holds. The dispatcher
    // forgets the subscription on its next delivery.
    pub fn stop_polling(&mut self) {
        self.poll_queue = None;
    }

    pub fn dispatcher(&self) -> &EventDispatcherPtr {
        &self.dispatcher
    }
}

impl Default for HeadphoneMotion {
    fn default() -> HeadphoneMotion {
        HeadphoneMotion::new()
    }
}

impl Drop for HeadphoneMotion {
    fn drop(&mut self) {
        self.service.release();
        self.dispatcher.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StubServiceCreator;

    #[test]
    fn default_service_on_this_platform() {
        let motion = HeadphoneMotion::new();
        if cfg!(all(target_os = "ios", feature = "coremotion")) {
            assert_eq!(motion.service_kind(), ServiceKind::CoreMotion);
        } else {
            assert_eq!(motion.service_kind(), ServiceKind::Stub);
            assert!(!motion.is_supported());
        }
    }

    #[test]
    fn init_twice_is_allowed() {
        let mut motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        assert!(!motion.is_initialized());
        motion.init();
        motion.init();
        assert!(motion.is_initialized());
    }

    #[test]
    fn subscriptions_go_through_the_context() {
        let motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        let a = motion.on_connection_changed(|_| {});
        let b = motion.on_head_rotation_raw(|_| {});
        let c = motion.on_head_rotation(|_| {});
        assert_eq!(motion.dispatcher().subscription_count(), 3);

        assert!(motion.unsubscribe(b));
        assert!(motion.unsubscribe(a));
        assert!(motion.unsubscribe(c));
        assert_eq!(motion.dispatcher().subscription_count(), 0);
    }

    #[test]
    fn poll_events_returns_dispatched_notifications() {
        let mut motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        assert!(motion.poll_events().is_empty());

        motion.dispatcher().dispatch_connection(true);
        motion.dispatcher().dispatch_rotation(RotationSample::new(0.0, 0.0, 0.0, 1.0));

        assert_eq!(motion.poll_events(), vec![
            HeadphoneMotionEvent::ConnectionChanged(true),
            HeadphoneMotionEvent::RawRotation(RotationSample::new(0.0, 0.0, 0.0, 1.0)),
            HeadphoneMotionEvent::Rotation(HeadRotation::new(0.0, 0.0, 0.0, -1.0)),
        ]);
        assert!(motion.poll_events().is_empty());
    }

    #[test]
    fn stop_polling_ends_the_subscription() {
        let mut motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        motion.poll_events();
        assert_eq!(motion.dispatcher().subscription_count(), 1);

        motion.dispatcher().dispatch_connection(true);
        motion.stop_polling();
        motion.dispatcher().dispatch_connection(false);
        assert_eq!(motion.dispatcher().subscription_count(), 0);

        // Polling again starts a fresh, empty queue.
        assert!(motion.poll_events().is_empty());
        assert_eq!(motion.dispatcher().subscription_count(), 1);
    }

    #[test]
    fn stub_context_never_receives_callbacks() {
        let mut motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        motion.init();
        assert!(!motion.is_receiving_callbacks());
    }

    #[test]
    fn drop_clears_subscriptions() {
        let motion = HeadphoneMotion::with_creator(StubServiceCreator::new().as_ref());
        let dispatcher = motion.dispatcher().clone();
        motion.on_connection_changed(|_| {});
        drop(motion);
        assert_eq!(dispatcher.subscription_count(), 0);
    }
}
