use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    error::{LoadError, ParseError},
    object::SceneObject,
    parser::{parse_scene_with, ParseOptions},
};

/// Extent of the image plane, which sits one unit in front of the eye.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Camera {
    pub width: f64,
    pub height: f64,
}

/// Objects in declaration order.
///
/// Built once by the parser; a non-empty scene always holds exactly one
/// camera.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub(crate) fn from_objects(objects: Vec<SceneObject>) -> Self {
        Self { objects }
    }

    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        parse_scene_with(input, ParseOptions::default())
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn camera(&self) -> Option<&Camera> {
        self.objects.iter().find_map(|o| match o {
            SceneObject::Camera(c) => Some(c),
            _ => None,
        })
    }

    /// Canonical scene text, readable by [`Scene::parse`].
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromStr for Scene {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scene::parse(s.as_bytes())
    }
}

/// Read and parse a scene file.
pub fn load(path: impl AsRef<Path>) -> Result<Scene, LoadError> {
    load_with(path, ParseOptions::default())
}

pub fn load_with(path: impl AsRef<Path>, options: ParseOptions) -> Result<Scene, LoadError> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read scene file");

    parse_scene_with(&data, options).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
