//! src/cylinder.rs
//! ---------------
//! Infinite cylinder whose axis runs parallel to Y through `center`.

use serde::Serialize;

use crate::{algebra::Vec3, sphere::solve_nearest};

/// Below this the ray runs along the axis and never meets the wall.
const AXIS_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Cylinder {
    pub radius   : f64,
    #[serde(rename = "position")]
    pub center   : Vec3,
    pub color    : Vec3,
}

impl Cylinder {
    /// Same root policy as the sphere, solved in the XZ plane only.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<f64> {
        let (ox, oz) = (ro.0 - self.center.0, ro.2 - self.center.2);
        let a = rd.0*rd.0 + rd.2*rd.2;
        if a < AXIS_EPSILON { return None; }

        let b = 2.0 * (rd.0*ox + rd.2*oz);
        let c = ox*ox + oz*oz - self.radius*self.radius;
        solve_nearest(a, b, c)
    }
}
