//! src/sphere.rs
//! -------------
//! Sphere with constant radius.

use serde::Serialize;

use crate::algebra::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sphere {
    pub radius   : f64,
    #[serde(rename = "position")]
    pub center   : Vec3,
    pub color    : Vec3,
}

impl Sphere {
    /// Intersect a ray (ro + t·rd).
    /// Returns the *nearest forward* hit; from inside the sphere that is the exit.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<f64> {
        let oc = ro.sub(self.center);
        solve_nearest(rd.dot(rd), 2.0 * rd.dot(oc), oc.dot(oc) - self.radius * self.radius)
    }
}

/// Smallest positive root of `a·t² + b·t + c = 0`, if any.
pub(crate) fn solve_nearest(a: f64, b: f64, c: f64) -> Option<f64> {
    let disc = b*b - 4.0*a*c;
    if disc < 0.0 { return None; }

    let sq = disc.sqrt();
    let t0 = (-b - sq) / (2.0 * a);
    if t0 > 0.0 { return Some(t0); }

    let t1 = (-b + sq) / (2.0 * a);
    if t1 > 0.0 { return Some(t1); }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(center: Vec3, radius: f64) -> Sphere {
        Sphere { center, radius, color: Vec3::ZERO }
    }

    #[test]
    fn test_hit_in_front() {
        let s = sphere(Vec3(0.0, 0.0, 5.0), 1.0);
        let t = s.hit(Vec3::ZERO, Vec3(0.0, 0.0, 1.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_origin_inside_returns_exit() {
        let s = sphere(Vec3::ZERO, 2.0);
        let t = s.hit(Vec3::ZERO, Vec3(0.0, 0.0, 1.0)).unwrap();
        assert!((t - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_behind_is_miss() {
        let s = sphere(Vec3(0.0, 0.0, -5.0), 1.0);
        assert_eq!(s.hit(Vec3::ZERO, Vec3(0.0, 0.0, 1.0)), None);
    }

    #[test]
    fn test_negative_discriminant_is_miss() {
        let s = sphere(Vec3(3.0, 0.0, 5.0), 1.0);
        assert_eq!(s.hit(Vec3::ZERO, Vec3(0.0, 0.0, 1.0)), None);
    }

    #[test]
    fn test_offset_origin() {
        let s = sphere(Vec3(1.0, 1.0, 10.0), 0.5);
        let t = s.hit(Vec3(1.0, 1.0, 0.0), Vec3(0.0, 0.0, 1.0)).unwrap();
        assert!((t - 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_solve_nearest() {
        // (t - 1)(t - 3)
        assert_eq!(solve_nearest(1.0, -4.0, 3.0), Some(1.0));
        // (t + 1)(t - 3): only the positive root counts
        assert_eq!(solve_nearest(1.0, -2.0, -3.0), Some(3.0));
        // (t + 1)(t + 3)
        assert_eq!(solve_nearest(1.0, 4.0, 3.0), None);
    }
}
