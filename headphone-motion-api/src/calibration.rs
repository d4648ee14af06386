use crate::HeadRotation;
use nalgebra::{Quaternion, UnitQuaternion};

// Re-centers head rotations on a reference pose captured by the user,
// e.g. "look straight ahead and press calibrate".
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationCalibration {
    offset: HeadRotation,
}

impl RotationCalibration {
    pub fn new() -> RotationCalibration {
        RotationCalibration::default()
    }

    // Uses `reference` as the new zero pose.
    pub fn calibrate(&mut self, reference: HeadRotation) {
        self.offset = reference;
    }

    pub fn reset(&mut self) {
        self.offset = HeadRotation::IDENTITY;
    }

    // A reference pose within float noise of identity counts as uncalibrated.
    pub fn is_calibrated(&self) -> bool {
        !self.offset.approx_eq(&HeadRotation::IDENTITY)
    }

    pub fn offset(&self) -> HeadRotation {
        self.offset
    }

    pub fn apply(&self, rotation: HeadRotation) -> HeadRotation {
        if self.is_calibrated() {
            let rotation = UnitQuaternion::new_normalize(Quaternion::from(rotation));
            let offset = UnitQuaternion::new_normalize(Quaternion::from(self.offset));
            (rotation * offset.inverse()).into_inner().into()
        } else {
            rotation
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncalibrated_passes_rotation_through() {
        let calibration = RotationCalibration::new();
        let r = HeadRotation::new(0.5, 0.5, 0.5, 0.5);
        assert!(!calibration.is_calibrated());
        assert_eq!(calibration.apply(r), r);
    }

    #[test]
    fn reference_pose_maps_to_identity() {
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let reference = HeadRotation::new(0.0, half, 0.0, half);
        let mut calibration = RotationCalibration::new();
        calibration.calibrate(reference);

        assert!(calibration.is_calibrated());
        let centered = calibration.apply(reference);
        assert!((centered.w.abs() - 1.0).abs() < 1e-6);
        assert!(centered.x.abs() < 1e-6 && centered.y.abs() < 1e-6 && centered.z.abs() < 1e-6);
    }

    #[test]
    fn reset_restores_identity_offset() {
        let mut calibration = RotationCalibration::new();
        calibration.calibrate(HeadRotation::new(0.0, 1.0, 0.0, 0.0));
        calibration.reset();
        assert!(!calibration.is_calibrated());
        assert_eq!(calibration.offset(), HeadRotation::IDENTITY);
    }

    #[test]
    fn near_identity_reference_is_not_a_calibration() {
        let mut calibration = RotationCalibration::new();
        calibration.calibrate(HeadRotation::new(0.0, 0.0001, 0.0, 1.0));
        assert!(!calibration.is_calibrated());

        let r = HeadRotation::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(calibration.apply(r), r);
    }

    #[test]
    fn offset_is_removed_from_later_poses() {
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let quarter = HeadRotation::new(0.0, half, 0.0, half);
        let mut calibration = RotationCalibration::new();
        calibration.calibrate(quarter);

        let centered = calibration.apply(quarter * quarter);
        assert!(centered.approx_eq(&quarter), "{:?}", centered);
    }
}
