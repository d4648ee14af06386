// Console walkthrough of the tracking flow against the mock service:
// init, subscribe, start tracking, calibrate on the first pose, toggle off.

#[macro_use]
extern crate log;

use headphone_motion::api::MockServiceCreator;
use headphone_motion::mock::{MockMotionControlMsg, MockMotionInit};
use headphone_motion::{HeadRotation, HeadphoneMotion, HeadphoneMotionEvent, RotationCalibration, RotationSample};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn yaw_sample(degrees: f64) -> RotationSample {
    // CMQuaternion for a turn about the vertical (z) axis of the native frame.
    let half = degrees.to_radians() / 2.0;
    RotationSample::new(0.0, 0.0, half.sin(), half.cos())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let (service, remote) = MockServiceCreator::new_service_with_remote(MockMotionInit::default());
    let mut motion = HeadphoneMotion::with_service(service);

    // Always first.
    motion.init();

    if !motion.is_headphone_motion_available() {
        info!("Headphone motion is not available");
        return;
    }
    info!("Headphone motion is available");

    let calibration = Arc::new(Mutex::new(RotationCalibration::new()));
    let last_rotation = Arc::new(Mutex::new(HeadRotation::IDENTITY));

    // Subscribe before starting, or the initial connection callback is missed.
    motion.on_connection_changed(|connected| {
        if connected {
            info!("Headphones are connected");
        } else {
            info!("Headphones are not connected");
        }
    });

    let c = calibration.clone();
    let last = last_rotation.clone();
    motion.on_head_rotation(move |rotation| {
        *last.lock().unwrap() = rotation;
        let target = c.lock().unwrap().apply(rotation);
        info!("Target rotation {:?}", target.to_array());
    });

    let events = motion.event_channel();
    motion.start_tracking();

    remote.send(MockMotionControlMsg::SetConnected(true)).unwrap();
    wait_for(&events, 1);

    remote.send(MockMotionControlMsg::Rotate(yaw_sample(30.0))).unwrap();
    wait_for(&events, 2);

    let reference = *last_rotation.lock().unwrap();
    calibration.lock().unwrap().calibrate(reference);
    info!("Calibrated starting rotation");

    for degrees in &[30.0, 45.0, 60.0] {
        remote.send(MockMotionControlMsg::Rotate(yaw_sample(*degrees))).unwrap();
        wait_for(&events, 2);
    }

    calibration.lock().unwrap().reset();
    info!("Calibration reset");

    motion.stop_tracking();
    remote.send(MockMotionControlMsg::Rotate(yaw_sample(90.0))).unwrap();
    remote.flush();
    info!("Tracking disabled, {} late events", events.try_iter().count());
}

fn wait_for(events: &std::sync::mpsc::Receiver<HeadphoneMotionEvent>, count: usize) {
    for _ in 0..count {
        if events.recv_timeout(Duration::from_secs(1)).is_err() {
            warn!("Timed out waiting for the mock headphones");
            return;
        }
    }
}
