use nalgebra::Quaternion;
use std::ops::Mul;

// Tolerance of the dot-product comparison in `HeadRotation::approx_eq`.
const DOT_EPSILON: f32 = 0.000_001;

// Head orientation as reported by the native headphone motion manager.
// Components map one to one onto CMQuaternion.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct RotationSample {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl RotationSample {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> RotationSample {
        RotationSample { x, y, z, w }
    }

    // Remaps the native right-handed frame into the engine frame.
    // The (x, z, y, -w) mapping is a fixed contract with downstream consumers.
    pub fn to_head_rotation(&self) -> HeadRotation {
        HeadRotation {
            x: self.x as f32,
            y: self.z as f32,
            z: self.y as f32,
            w: -self.w as f32,
        }
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f64; 4]> for RotationSample {
    fn from(v: [f64; 4]) -> RotationSample {
        RotationSample::new(v[0], v[1], v[2], v[3])
    }
}

/// Head rotation in the engine convention (left-handed, Y up).
///
/// Produced from a [`RotationSample`] by [`RotationSample::to_head_rotation`];
/// ready to be assigned to an object's rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub struct HeadRotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl HeadRotation {
    pub const IDENTITY: HeadRotation = HeadRotation { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f32, y: f32, z: f32, w: f32) -> HeadRotation {
        HeadRotation { x, y, z, w }
    }

    // Conjugate. Inputs are unit quaternions so this is the inverse rotation.
    pub fn inverse(&self) -> HeadRotation {
        Quaternion::from(*self).conjugate().into()
    }

    pub fn dot(&self, other: &HeadRotation) -> f32 {
        Quaternion::from(*self).dot(&Quaternion::from(*other))
    }

    // Same orientation up to float noise. `q` and `-q` compare unequal.
    pub fn approx_eq(&self, other: &HeadRotation) -> bool {
        self.dot(other) > 1.0 - DOT_EPSILON
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl Default for HeadRotation {
    fn default() -> HeadRotation {
        HeadRotation::IDENTITY
    }
}

impl From<RotationSample> for HeadRotation {
    fn from(sample: RotationSample) -> HeadRotation {
        sample.to_head_rotation()
    }
}

impl From<HeadRotation> for Quaternion<f32> {
    fn from(r: HeadRotation) -> Quaternion<f32> {
        Quaternion::new(r.w, r.x, r.y, r.z)
    }
}

impl From<Quaternion<f32>> for HeadRotation {
    fn from(q: Quaternion<f32>) -> HeadRotation {
        HeadRotation::new(q.i, q.j, q.k, q.w)
    }
}

// Hamilton product: applies `rhs` first, then `self`.
impl Mul for HeadRotation {
    type Output = HeadRotation;

    fn mul(self, rhs: HeadRotation) -> HeadRotation {
        (Quaternion::from(self) * Quaternion::from(rhs)).into()
    }
}
