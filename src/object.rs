use std::fmt;

use serde::Serialize;

use crate::{algebra::Vec3, cylinder::Cylinder, plane::Plane, scene::Camera, sphere::Sphere};

/// One entry of a scene file, keyed by its `"type"`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SceneObject {
    Camera(Camera),
    Sphere(Sphere),
    Plane(Plane),
    Cylinder(Cylinder),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Camera,
    Sphere,
    Plane,
    Cylinder,
}

impl ObjectKind {
    /// Look up the kind named by a `"type"` value.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "camera" => Some(Self::Camera),
            "sphere" => Some(Self::Sphere),
            "plane" => Some(Self::Plane),
            "cylinder" => Some(Self::Cylinder),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Sphere => "sphere",
            Self::Plane => "plane",
            Self::Cylinder => "cylinder",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl SceneObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Camera(_) => ObjectKind::Camera,
            Self::Sphere(_) => ObjectKind::Sphere,
            Self::Plane(_) => ObjectKind::Plane,
            Self::Cylinder(_) => ObjectKind::Cylinder,
        }
    }

    /// Nearest positive ray parameter, `rd` already normalized.
    /// The camera is not a surface and never reports a hit.
    pub fn hit(&self, ro: Vec3, rd: Vec3) -> Option<f64> {
        match self {
            Self::Camera(_) => None,
            Self::Sphere(s) => s.hit(ro, rd),
            Self::Plane(p) => p.hit(ro, rd),
            Self::Cylinder(c) => c.hit(ro, rd),
        }
    }

    pub fn color(&self) -> Option<Vec3> {
        match self {
            Self::Camera(_) => None,
            Self::Sphere(s) => Some(s.color),
            Self::Plane(p) => Some(p.color),
            Self::Cylinder(c) => Some(c.color),
        }
    }
}

/// Free-function form of [`SceneObject::hit`].
pub fn intersect(object: &SceneObject, ray_origin: Vec3, ray_dir: Vec3) -> Option<f64> {
    object.hit(ray_origin, ray_dir)
}
