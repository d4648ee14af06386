#![allow(non_snake_case)]

// Exported by the native HeadphoneMotion shim, which owns the
// CMHeadphoneMotionManager instance and calls the registered delegates from
// its own queue.

use crate::bridge::{HeadphoneConnectionCallback, RotationCallback};

extern "C" {
    pub fn isHeadphoneMotionAvailable() -> bool;

    pub fn areHeadphonesConnected() -> bool;

    pub fn startTracking() -> bool;

    pub fn stopTracking() -> bool;

    pub fn setHeadphoneConnectionDelegate(callback: HeadphoneConnectionCallback);

    pub fn setRotationDelegate(callback: RotationCallback);
}
