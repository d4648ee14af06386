#![cfg_attr(not(any(all(target_os = "ios", feature = "coremotion"), feature = "mock")), allow(dead_code))]

// Entry points the native motion manager calls back into. The mock service
// delivers through them too.
//
// The native delegates carry no user data, so the trampolines find their
// target through a single slot. The slot is written by `HeadphoneMotion::init`
// and cleared when that context is dropped; callbacks arriving while it is
// empty are dropped.

use headphone_motion_api::{EventDispatcher, EventDispatcherPtr, RotationSample};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock};

pub type HeadphoneConnectionCallback = extern "C" fn(connected: bool);
pub type RotationCallback = extern "C" fn(x: f64, y: f64, z: f64, w: f64);

static DISPATCHER: RwLock<Option<EventDispatcherPtr>> = RwLock::new(None);

pub fn install(dispatcher: EventDispatcherPtr) {
    let mut slot = DISPATCHER.write().unwrap_or_else(PoisonError::into_inner);
    if let Some(ref current) = *slot {
        if !Arc::ptr_eq(current, &dispatcher) {
            warn!("Another HeadphoneMotion context was initialized, it no longer receives native callbacks");
        }
    }
    *slot = Some(dispatcher);
}

// Clears the slot if it still points at `dispatcher`.
pub fn uninstall(dispatcher: &EventDispatcherPtr) -> bool {
    let mut slot = DISPATCHER.write().unwrap_or_else(PoisonError::into_inner);
    match *slot {
        Some(ref current) if Arc::ptr_eq(current, dispatcher) => {
            *slot = None;
            true
        }
        _ => false,
    }
}

pub fn is_installed(dispatcher: &EventDispatcherPtr) -> bool {
    match *DISPATCHER.read().unwrap_or_else(PoisonError::into_inner) {
        Some(ref current) => Arc::ptr_eq(current, dispatcher),
        None => false,
    }
}

pub extern "C" fn headphone_connection_changed(connected: bool) {
    deliver("connection", |dispatcher| dispatcher.dispatch_connection(connected));
}

pub extern "C" fn rotation_updated(x: f64, y: f64, z: f64, w: f64) {
    deliver("rotation", |dispatcher| dispatcher.dispatch_rotation(RotationSample::new(x, y, z, w)));
}

// Runs on the native motion thread. Must not block and must not unwind.
fn deliver<F: FnOnce(&EventDispatcher)>(channel: &str, f: F) {
    let dispatcher = match *DISPATCHER.read().unwrap_or_else(PoisonError::into_inner) {
        Some(ref dispatcher) => dispatcher.clone(),
        None => {
            trace!("Dropping {} callback, HeadphoneMotion is not initialized", channel);
            return;
        }
    };

    if panic::catch_unwind(AssertUnwindSafe(|| f(&dispatcher))).is_err() {
        error!("A headphone motion {} listener panicked", channel);
    }
}
