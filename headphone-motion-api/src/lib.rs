#[macro_use]
extern crate log;

#[cfg(feature = "serde-serialization")]
#[macro_use]
extern crate serde_derive;

pub mod calibration;
pub mod event_dispatcher;
pub mod mock;
pub mod motion_event;
pub mod motion_service;
pub mod rotation;

pub use calibration::RotationCalibration;
pub use event_dispatcher::{EventDispatcher, EventDispatcherPtr, SubscriptionId};
pub use motion_event::HeadphoneMotionEvent;
pub use motion_service::{HeadphoneMotionService, HeadphoneMotionServiceCreator, ServiceKind};
pub use rotation::{HeadRotation, RotationSample};
