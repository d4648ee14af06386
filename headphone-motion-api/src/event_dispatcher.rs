use crate::{HeadRotation, HeadphoneMotionEvent, RotationSample};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type EventDispatcherPtr = Arc<EventDispatcher>;

type ConnectionListener = Arc<dyn Fn(bool) + Send + Sync>;
type RawRotationListener = Arc<dyn Fn(RotationSample) + Send + Sync>;
type RotationListener = Arc<dyn Fn(HeadRotation) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    connection: Vec<(SubscriptionId, ConnectionListener)>,
    raw_rotation: Vec<(SubscriptionId, RawRotationListener)>,
    rotation: Vec<(SubscriptionId, RotationListener)>,
    channels: Vec<(SubscriptionId, Sender<HeadphoneMotionEvent>)>,
}

impl Listeners {
    fn len(&self) -> usize {
        self.connection.len() + self.raw_rotation.len() + self.rotation.len() + self.channels.len()
    }
}

/// Subscription registry for headphone motion notifications.
///
/// Dispatch methods are called from the thread that owns the native callback,
/// so listeners must return quickly and must not block. Listeners run outside
/// the registry lock and may subscribe or unsubscribe from inside a callback;
/// such changes take effect from the next notification.
#[derive(Default)]
pub struct EventDispatcher {
    next_id: AtomicU64,
    listeners: Mutex<Listeners>,
}

impl EventDispatcher {
    pub fn new() -> EventDispatcherPtr {
        Arc::new(EventDispatcher::default())
    }

    pub fn subscribe_connection<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(bool) + Send + Sync + 'static
    {
        let id = self.new_id();
        self.lock().connection.push((id, Arc::new(listener)));
        id
    }

    pub fn subscribe_raw_rotation<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(RotationSample) + Send + Sync + 'static
    {
        let id = self.new_id();
        self.lock().raw_rotation.push((id, Arc::new(listener)));
        id
    }

    pub fn subscribe_rotation<F>(&self, listener: F) -> SubscriptionId
        where F: Fn(HeadRotation) + Send + Sync + 'static
    {
        let id = self.new_id();
        self.lock().rotation.push((id, Arc::new(listener)));
        id
    }

    // Forwards every notification of every channel, in dispatch order.
    // The subscription ends when the receiving side is dropped.
    pub fn subscribe_channel(&self, sender: Sender<HeadphoneMotionEvent>) -> SubscriptionId {
        let id = self.new_id();
        self.lock().channels.push((id, sender));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let before = listeners.len();
        listeners.connection.retain(|(i, _)| *i != id);
        listeners.raw_rotation.retain(|(i, _)| *i != id);
        listeners.rotation.retain(|(i, _)| *i != id);
        listeners.channels.retain(|(i, _)| *i != id);
        listeners.len() != before
    }

    pub fn clear(&self) {
        let mut listeners = self.lock();
        debug!("Dropping {} headphone motion subscriptions", listeners.len());
        *listeners = Listeners::default();
    }

    pub fn subscription_count(&self) -> usize {
        self.lock().len()
    }

    pub fn dispatch_connection(&self, connected: bool) {
        let (listeners, channels) = {
            let guard = self.lock();
            (guard.connection.clone(), guard.channels.clone())
        };

        for (_, listener) in &listeners {
            listener(connected);
        }
        self.forward(&channels, &[HeadphoneMotionEvent::ConnectionChanged(connected)]);
    }

    // Raw listeners see the sample first, converted listeners second.
    pub fn dispatch_rotation(&self, sample: RotationSample) {
        let (raw, converted, channels) = {
            let guard = self.lock();
            (guard.raw_rotation.clone(), guard.rotation.clone(), guard.channels.clone())
        };

        for (_, listener) in &raw {
            listener(sample);
        }

        let rotation = sample.to_head_rotation();
        for (_, listener) in &converted {
            listener(rotation);
        }

        self.forward(&channels, &[
            HeadphoneMotionEvent::RawRotation(sample),
            HeadphoneMotionEvent::Rotation(rotation),
        ]);
    }
}

impl EventDispatcher {
    fn new_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn lock(&self) -> MutexGuard<Listeners> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn forward(&self, channels: &[(SubscriptionId, Sender<HeadphoneMotionEvent>)], events: &[HeadphoneMotionEvent]) {
        let mut closed = Vec::new();
        for (id, sender) in channels {
            if events.iter().any(|event| sender.send(*event).is_err()) {
                closed.push(*id);
            }
        }

        if !closed.is_empty() {
            self.lock().channels.retain(|(id, _)| !closed.contains(id));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn rotation_reaches_raw_before_converted() {
        let dispatcher = EventDispatcher::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let l = log.clone();
        dispatcher.subscribe_rotation(move |r| l.lock().unwrap().push(format!("converted {:?}", r.to_array())));
        let l = log.clone();
        dispatcher.subscribe_raw_rotation(move |s| l.lock().unwrap().push(format!("raw {:?}", s.to_array())));

        dispatcher.dispatch_rotation(RotationSample::new(0.0, 0.0, 0.0, 1.0));

        let log = log.lock().unwrap();
        assert_eq!(*log, vec![
            "raw [0.0, 0.0, 0.0, 1.0]".to_string(),
            "converted [0.0, 0.0, 0.0, -1.0]".to_string(),
        ]);
    }

    #[test]
    fn connection_value_is_forwarded_unchanged() {
        let dispatcher = EventDispatcher::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = seen.clone();
        dispatcher.subscribe_connection(move |c| s.lock().unwrap().push(c));

        dispatcher.dispatch_connection(true);
        dispatcher.dispatch_connection(false);
        dispatcher.dispatch_connection(true);

        assert_eq!(*seen.lock().unwrap(), vec![true, false, true]);
    }

    #[test]
    fn dispatch_without_listeners_is_noop() {
        let dispatcher = EventDispatcher::new();
        dispatcher.dispatch_connection(true);
        dispatcher.dispatch_rotation(RotationSample::new(0.1, 0.2, 0.3, 0.9));
        assert_eq!(dispatcher.subscription_count(), 0);
    }

    #[test]
    fn unsubscribed_listener_is_not_called() {
        let dispatcher = EventDispatcher::new();
        let hits = Arc::new(AtomicU64::new(0));
        let h = hits.clone();
        let id = dispatcher.subscribe_connection(move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });

        dispatcher.dispatch_connection(true);
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        dispatcher.dispatch_connection(false);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn listener_may_subscribe_from_callback() {
        let dispatcher = EventDispatcher::new();
        let d = dispatcher.clone();
        dispatcher.subscribe_connection(move |_| {
            d.subscribe_connection(|_| {});
        });

        dispatcher.dispatch_connection(true);
        assert_eq!(dispatcher.subscription_count(), 2);
    }

    #[test]
    fn channel_receives_events_in_order() {
        let dispatcher = EventDispatcher::new();
        let (tx, rx) = channel();
        dispatcher.subscribe_channel(tx);

        let sample = RotationSample::new(0.5, -0.5, 0.5, -0.5);
        dispatcher.dispatch_connection(true);
        dispatcher.dispatch_rotation(sample);

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![
            HeadphoneMotionEvent::ConnectionChanged(true),
            HeadphoneMotionEvent::RawRotation(sample),
            HeadphoneMotionEvent::Rotation(HeadRotation::new(0.5, 0.5, -0.5, 0.5)),
        ]);
    }

    #[test]
    fn closed_channel_is_pruned() {
        let dispatcher = EventDispatcher::new();
        let (tx, rx) = channel();
        dispatcher.subscribe_channel(tx);
        drop(rx);

        dispatcher.dispatch_connection(false);
        assert_eq!(dispatcher.subscription_count(), 0);
    }

    #[test]
    fn clear_drops_everything() {
        let dispatcher = EventDispatcher::new();
        dispatcher.subscribe_connection(|_| {});
        dispatcher.subscribe_raw_rotation(|_| {});
        dispatcher.subscribe_rotation(|_| {});
        assert_eq!(dispatcher.subscription_count(), 3);

        dispatcher.clear();
        assert_eq!(dispatcher.subscription_count(), 0);
    }
}
