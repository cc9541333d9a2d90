use serde::{Serialize, Serializer};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::DegenerateVector;

/// Vectors shorter than this cannot be normalized.
pub const NORMALIZE_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3(pub f64, pub f64, pub f64);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3(0.0, 0.0, 0.0);

    pub fn add(self, v: Self) -> Self { Self(self.0+v.0, self.1+v.1, self.2+v.2) }
    pub fn sub(self, v: Self) -> Self { Self(self.0-v.0, self.1-v.1, self.2-v.2) }
    pub fn scale(self, f: f64) -> Self { Self(self.0*f, self.1*f, self.2*f) }
    pub fn dot(self, v: Self) -> f64 { self.0*v.0 + self.1*v.1 + self.2*v.2 }
    pub fn length(self) -> f64 { self.dot(self).sqrt() }
    pub fn neg(self) -> Self { Self(-self.0,-self.1,-self.2) }

    /// Unit vector pointing the same way as `self`.
    ///
    /// Fails for (near) zero-length input instead of producing NaNs.
    pub fn normalize(self) -> Result<Self, DegenerateVector> {
        let len = self.length();
        if !(len >= NORMALIZE_EPSILON) {
            return Err(DegenerateVector { length: len });
        }
        Ok(self.scale(1.0/len))
    }

    pub fn to_array(self) -> [f64; 3] { [self.0, self.1, self.2] }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self { Vec3(a[0], a[1], a[2]) }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, v: Vec3) -> Vec3 { Vec3::add(self, v) }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, v: Vec3) -> Vec3 { Vec3::sub(self, v) }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, f: f64) -> Vec3 { self.scale(f) }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 { Vec3::neg(self) }
}

/* Scene files spell vectors as `[x, y, z]` */
impl Serialize for Vec3 {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        self.to_array().serialize(s)
    }
}
