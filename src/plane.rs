use serde::Serialize;

use crate::algebra::Vec3;
use crate::error::DegenerateVector;

/// Rays closer than this to parallel never meet the plane.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Infinite plane through `point`.
///
/// The normal is kept as declared for writing the scene back out, next to
/// its unit version used for intersection.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Plane {
    normal      : Vec3,
    #[serde(rename = "position")]
    pub point   : Vec3,
    pub color   : Vec3,
    #[serde(skip)]
    unit_normal : Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3, color: Vec3) -> Result<Self, DegenerateVector> {
        let unit_normal = normal.normalize()?;
        Ok(Self { normal, point, color, unit_normal })
    }

    pub fn normal(&self) -> Vec3 { self.normal }
    pub fn unit_normal(&self) -> Vec3 { self.unit_normal }

    /// Returns `t` or `None` if the ray is parallel or the plane lies behind it.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<f64> {
        let denom = self.unit_normal.dot(rd);
        if denom.abs() < PARALLEL_EPSILON {            // ray ‖ plane
            return None;
        }

        let t = self.point.sub(ro).dot(self.unit_normal) / denom;
        if !t.is_finite() || t <= 0.0 {
            return None;
        }
        Some(t)
    }
}
