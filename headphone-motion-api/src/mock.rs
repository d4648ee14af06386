use crate::RotationSample;

// Messages that drive the mock service from a test or a demo.
// The mock plays the role of the native motion manager thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockMotionControlMsg {
    SetConnected(bool),
    Rotate(RotationSample),
}

// Initial state of the simulated device.
#[derive(Debug, Clone, Copy)]
pub struct MockMotionInit {
    pub available: bool,
    pub connected: bool,
}

impl Default for MockMotionInit {
    fn default() -> MockMotionInit {
        MockMotionInit {
            available: true,
            connected: false,
        }
    }
}
