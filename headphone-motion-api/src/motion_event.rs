use crate::{HeadRotation, RotationSample};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum HeadphoneMotionEvent {
    // Headphones were connected (true) or disconnected (false).
    ConnectionChanged(bool),

    // Unconverted CMQuaternion values.
    RawRotation(RotationSample),

    // Rotation converted to the engine convention.
    Rotation(HeadRotation),
}
