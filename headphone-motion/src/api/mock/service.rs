use crate::bridge;
use headphone_motion_api::mock::{MockMotionControlMsg, MockMotionInit};
use headphone_motion_api::{EventDispatcherPtr, HeadphoneMotionService, RotationSample, ServiceKind};
use std::sync::mpsc::{channel, Receiver, SendError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

// How long `release` waits for the motion thread to drain its queue.
const RELEASE_FLUSH_TIMEOUT: Duration = Duration::from_secs(1);

// Simulates the native motion manager, including its delivery rules:
// nothing is reported before tracking starts or after it stops, and rotations
// only arrive while headphones are connected.
//
// Notifications leave the simulated motion thread through the same `extern "C"`
// trampolines the native delegates are registered with, so they reach whichever
// dispatcher currently owns the trampoline slot.
pub struct MockMotionService {
    state: Arc<Mutex<MockMotionState>>,
    queue: Sender<Command>,
    dispatcher: Option<EventDispatcherPtr>,
}

struct MockMotionState {
    available: bool,
    connected: bool,
    tracking: bool,
    start_requested: bool,
    delegates_registered: bool,
}

// Work for the simulated motion thread, handled strictly in order.
enum Command {
    Remote(MockMotionControlMsg),
    StartTracking,
    Flush(Sender<()>),
}

#[derive(Debug, PartialEq)]
enum Notification {
    Connection(bool),
    Rotation(RotationSample),
}

/// Stands in for the headphones. Connection changes and rotation samples sent
/// through it are handled on the simulated motion thread, in order with
/// tracking requests made on the service.
#[derive(Clone)]
pub struct MockRemote {
    queue: Sender<Command>,
}

impl MockRemote {
    pub fn send(&self, msg: MockMotionControlMsg) -> Result<(), SendError<MockMotionControlMsg>> {
        self.queue.send(Command::Remote(msg)).map_err(|_| SendError(msg))
    }

    // Blocks until everything queued before this call has been handled and
    // delivered. Returns false if the motion thread is gone.
    pub fn flush(&self) -> bool {
        let (tx, rx) = channel();
        if self.queue.send(Command::Flush(tx)).is_err() {
            return false;
        }
        rx.recv().is_ok()
    }
}

impl MockMotionService {
    pub fn new(init: MockMotionInit) -> MockMotionService {
        let state = Arc::new(Mutex::new(MockMotionState::new(init)));
        let (queue, rcv) = channel();
        spawn_motion_thread(state.clone(), rcv);
        MockMotionService {
            state,
            queue,
            dispatcher: None,
        }
    }

    pub fn remote(&self) -> MockRemote {
        MockRemote {
            queue: self.queue.clone(),
        }
    }
}

// Runs until the service and every remote are dropped.
fn spawn_motion_thread(state: Arc<Mutex<MockMotionState>>, rcv: Receiver<Command>) {
    thread::spawn(move || {
        while let Ok(cmd) = rcv.recv() {
            // Notify outside the lock, listeners may query the service.
            let notification = lock(&state).handle(cmd);
            notify(notification);
        }
        debug!("Mock headphone remote closed");
    });
}

impl HeadphoneMotionService for MockMotionService {
    fn kind(&self) -> ServiceKind {
        ServiceKind::Mock
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn initialize(&mut self, dispatcher: EventDispatcherPtr) {
        bridge::install(dispatcher.clone());
        lock(&self.state).delegates_registered = true;
        self.dispatcher = Some(dispatcher);
    }

    // The delegates stay registered, like the native ones. Later callbacks
    // hit an empty slot and are dropped there.
    fn release(&mut self) {
        if let Some(dispatcher) = self.dispatcher.take() {
            bridge::uninstall(&dispatcher);
        }
        let (tx, rx) = channel();
        if self.queue.send(Command::Flush(tx)).is_ok() {
            let _ = rx.recv_timeout(RELEASE_FLUSH_TIMEOUT);
        }
    }

    fn is_headphone_motion_available(&self) -> bool {
        lock(&self.state).available
    }

    fn are_headphones_connected(&self) -> bool {
        lock(&self.state).connected
    }

    // Tracking begins on the motion thread, behind anything already queued.
    fn start_tracking(&mut self) -> bool {
        {
            let mut state = lock(&self.state);
            if !state.available {
                return false;
            }
            state.start_requested = true;
        }
        if self.queue.send(Command::StartTracking).is_err() {
            warn!("Mock headphone motion thread is gone");
        }
        true
    }

    fn stop_tracking(&mut self) -> bool {
        let mut state = lock(&self.state);
        let was_requested = state.start_requested;
        state.start_requested = false;
        state.tracking = false;
        was_requested
    }
}

impl Drop for MockMotionService {
    fn drop(&mut self) {
        self.release();
    }
}

impl MockMotionState {
    fn new(init: MockMotionInit) -> MockMotionState {
        MockMotionState {
            available: init.available,
            connected: init.available && init.connected,
            tracking: false,
            start_requested: false,
            delegates_registered: false,
        }
    }

    fn handle(&mut self, cmd: Command) -> Option<Notification> {
        let notification = match cmd {
            Command::Remote(MockMotionControlMsg::SetConnected(connected)) => {
                if !self.available || self.connected == connected {
                    return None;
                }
                self.connected = connected;
                if self.tracking {
                    Some(Notification::Connection(connected))
                } else {
                    None
                }
            }
            Command::Remote(MockMotionControlMsg::Rotate(sample)) => {
                if self.tracking && self.connected {
                    Some(Notification::Rotation(sample))
                } else {
                    None
                }
            }
            Command::StartTracking => {
                // Stopped again before the request got here, or already running.
                if !self.start_requested || self.tracking {
                    return None;
                }
                self.tracking = true;
                // The motion manager reports already connected headphones once
                // tracking begins.
                if self.connected {
                    Some(Notification::Connection(true))
                } else {
                    None
                }
            }
            Command::Flush(reply) => {
                let _ = reply.send(());
                None
            }
        };

        if self.delegates_registered {
            notification
        } else {
            None
        }
    }
}

fn lock(state: &Mutex<MockMotionState>) -> MutexGuard<MockMotionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

fn notify(notification: Option<Notification>) {
    match notification {
        Some(Notification::Connection(connected)) => bridge::headphone_connection_changed(connected),
        Some(Notification::Rotation(s)) => bridge::rotation_updated(s.x, s.y, s.z, s.w),
        None => {}
    }
}
