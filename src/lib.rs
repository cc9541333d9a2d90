//! Silhouette ray caster for small analytic scenes.
//!
//! A scene file lists one camera plus spheres, planes and cylinders. Each
//! pixel casts one ray from the eye through the image plane and records
//! whether it meets anything.

pub mod algebra;
pub mod cylinder;
pub mod error;
pub mod object;
pub mod parser;
pub mod plane;
pub mod renderer;
pub mod scene;
pub mod sphere;

pub use algebra::Vec3;
pub use error::{DegenerateVector, LoadError, ParseError};
pub use object::{intersect, ObjectKind, SceneObject};
pub use parser::{parse_scene, parse_scene_with, ParseOptions};
pub use renderer::{nearest_hit, render, Frame, RenderOptions};
pub use scene::{load, load_with, Camera, Scene};
