use crate::{
    algebra::Vec3,
    object::SceneObject,
    scene::{Camera, Scene},
};
use image::{GrayImage, Luma};
use indicatif::ProgressBar;
use rayon::prelude::*;

/// The legacy renderer always drew 20 x 20 glyphs.
pub const DEFAULT_COLUMNS: u32 = 20;
pub const DEFAULT_ROWS: u32 = 20;

/// Image size in glyphs. A zero dimension renders an empty frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub columns: u32,
    pub rows: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { columns: DEFAULT_COLUMNS, rows: DEFAULT_ROWS }
    }
}

/// Hit / miss per pixel, row-major with row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    columns: u32,
    rows: u32,
    hits: Vec<bool>,
}

impl Frame {
    pub fn columns(&self) -> u32 { self.columns }
    pub fn rows(&self) -> u32 { self.rows }

    /// Panics if `col` or `row` lies outside the frame.
    pub fn is_hit(&self, col: u32, row: u32) -> bool {
        assert!(col < self.columns && row < self.rows, "pixel ({col}, {row}) outside frame");
        self.hits[row as usize * self.columns as usize + col as usize]
    }

    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// One glyph per pixel, newline after every row.
    pub fn to_ascii(&self, hit: char, miss: char) -> String {
        let columns = self.columns as usize;
        let mut out = String::with_capacity(self.hits.len() + self.rows as usize);
        for row in 0..self.rows as usize {
            let cells = &self.hits[row * columns..(row + 1) * columns];
            out.extend(cells.iter().map(|&h| if h { hit } else { miss }));
            out.push('\n');
        }
        out
    }

    /// White silhouette on black.
    pub fn to_image(&self) -> GrayImage {
        GrayImage::from_fn(self.columns, self.rows, |x, y| {
            Luma([if self.is_hit(x, y) { 255 } else { 0 }])
        })
    }
}

/// Closest object along the ray, with its `t`.
///
/// Equal `t` goes to the object declared first.
pub fn nearest_hit(scene: &Scene, ro: Vec3, rd: Vec3) -> Option<(f64, &SceneObject)> {
    scene.objects()
        .iter()
        .filter_map(|o| o.hit(ro, rd).map(|t| (t, o)))
        .min_by(|a, b| a.0.total_cmp(&b.0))
}

/// Unit direction from the eye (origin) through the center of a pixel on the
/// image plane at z = 1.
///
/// `col` and `row` must lie inside `opts`, so both dimensions are non-zero.
pub fn primary_ray(camera: &Camera, opts: &RenderOptions, col: u32, row: u32) -> Vec3 {
    let (w, h) = (camera.width, camera.height);
    let pw = w / opts.columns as f64;
    let ph = h / opts.rows as f64;
    let p = Vec3(
        -w/2.0 + pw * (col as f64 + 0.5),
         h/2.0 - ph * (row as f64 + 0.5),
        1.0,
    );
    // z is 1, so the length is at least 1
    p.scale(1.0 / p.length())
}

/// Cast one ray per pixel. Rows are traced in parallel; the scene is only read.
pub fn render(scene: &Scene, opts: &RenderOptions, bar: Option<&ProgressBar>) -> Frame {
    let Some(camera) = scene.camera() else {
        tracing::debug!("scene has no camera, every pixel misses");
        return Frame {
            columns: opts.columns,
            rows: opts.rows,
            hits: vec![false; opts.columns as usize * opts.rows as usize],
        };
    };
    tracing::debug!(
        columns = opts.columns,
        rows = opts.rows,
        width = camera.width,
        height = camera.height,
        objects = scene.len(),
        "casting rays"
    );

    let ro = Vec3::ZERO;
    let hits = (0..opts.rows).into_par_iter().flat_map_iter(|row| {
        if let Some(b) = bar {
            b.inc(1);
        }
        (0..opts.columns).map(move |col| {
            let rd = primary_ray(camera, opts, col, row);
            nearest_hit(scene, ro, rd).is_some()
        })
    }).collect();

    Frame { columns: opts.columns, rows: opts.rows, hits }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{plane::Plane, sphere::Sphere};

    const EXAMPLE: &str = r#"[
  { "type": "camera", "width": 0.7, "height": 0.7 },
  { "type": "sphere", "radius": 2, "position": [0, 2, 5], "color": [1,0,0] },
  { "type": "plane", "normal": [0,1,0], "position": [0,-1,0], "color": [0,1,0] }
]"#;

    fn sphere(z: f64, radius: f64) -> SceneObject {
        SceneObject::Sphere(Sphere { center: Vec3(0.0, 0.0, z), radius, color: Vec3::ZERO })
    }

    fn scene(objects: Vec<SceneObject>) -> Scene {
        Scene::from_objects(objects)
    }

    const FORWARD: Vec3 = Vec3(0.0, 0.0, 1.0);

    #[test]
    fn test_nearest_of_overlapping_spheres() {
        let s = scene(vec![sphere(6.0, 1.5), sphere(5.0, 1.0)]);
        let (t, obj) = nearest_hit(&s, Vec3::ZERO, FORWARD).unwrap();
        assert!((t - 4.0).abs() < 1e-12);
        assert_eq!(*obj, s.objects()[1]);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let wall = SceneObject::Plane(
            Plane::new(Vec3(0.0, 0.0, 4.0), Vec3(0.0, 0.0, -1.0), Vec3(0.0, 0.0, 1.0)).unwrap(),
        );
        let ball = sphere(5.0, 1.0);

        let s = scene(vec![wall, ball]);
        let (t, obj) = nearest_hit(&s, Vec3::ZERO, FORWARD).unwrap();
        assert_eq!(t, 4.0);
        assert_eq!(*obj, wall);

        let s = scene(vec![ball, wall]);
        let (t, obj) = nearest_hit(&s, Vec3::ZERO, FORWARD).unwrap();
        assert_eq!(t, 4.0);
        assert_eq!(*obj, ball);
    }

    #[test]
    fn test_misses_never_win() {
        let behind = sphere(-5.0, 1.0);
        let ahead = sphere(10.0, 1.0);
        let s = scene(vec![behind, SceneObject::Camera(Camera { width: 1.0, height: 1.0 }), ahead]);
        let (t, obj) = nearest_hit(&s, Vec3::ZERO, FORWARD).unwrap();
        assert!((t - 9.0).abs() < 1e-12);
        assert_eq!(*obj, ahead);

        assert!(nearest_hit(&scene(vec![behind]), Vec3::ZERO, FORWARD).is_none());
        assert!(nearest_hit(&Scene::default(), Vec3::ZERO, FORWARD).is_none());
    }

    #[test]
    fn test_primary_ray_center_and_corners() {
        let cam = Camera { width: 2.0, height: 2.0 };
        let opts = RenderOptions { columns: 1, rows: 1 };
        assert_eq!(primary_ray(&cam, &opts, 0, 0), FORWARD);

        let opts = RenderOptions { columns: 2, rows: 2 };
        let top_left = primary_ray(&cam, &opts, 0, 0);
        assert!(top_left.0 < 0.0 && top_left.1 > 0.0);
        assert!((top_left.length() - 1.0).abs() < 1e-12);
        let bottom_right = primary_ray(&cam, &opts, 1, 1);
        assert!(bottom_right.0 > 0.0 && bottom_right.1 < 0.0);
    }

    #[test]
    fn test_render_example_scene() {
        let s: Scene = EXAMPLE.parse().unwrap();
        let frame = render(&s, &RenderOptions::default(), None);
        assert_eq!((frame.columns(), frame.rows()), (20, 20));

        // The middle column sees the sphere above the horizon and the floor below.
        for row in 0..20 {
            assert!(frame.is_hit(10, row), "row {row}");
        }
        // Just above the horizon the corner ray passes beside the sphere.
        assert!(!frame.is_hit(0, 9));
        assert!(frame.is_hit(0, 10));

        let ascii = frame.to_ascii('#', '.');
        assert_eq!(ascii.lines().count(), 20);
        assert!(ascii.lines().all(|l| l.chars().count() == 20));
        assert!(ascii.contains('#') && ascii.contains('.'));
        assert!(ascii.ends_with('\n'));
    }

    #[test]
    fn test_floor_fills_bottom_half() {
        let s: Scene = r#"[{"type":"camera","width":1,"height":1},
            {"type":"plane","normal":[0,1,0],"position":[0,-1,0]}]"#
            .parse()
            .unwrap();
        let frame = render(&s, &RenderOptions { columns: 4, rows: 4 }, None);
        assert_eq!(frame.to_ascii('#', '.'), "....\n....\n####\n####\n");
        assert_eq!(frame.hit_count(), 8);
    }

    #[test]
    fn test_empty_scene_is_all_misses() {
        let frame = render(&Scene::default(), &RenderOptions { columns: 3, rows: 2 }, None);
        assert_eq!(frame.to_ascii('#', '.'), "...\n...\n");

        let camera_only: Scene = r#"[{"type":"camera","width":1,"height":1}]"#.parse().unwrap();
        let frame = render(&camera_only, &RenderOptions { columns: 3, rows: 2 }, None);
        assert_eq!(frame.hit_count(), 0);
    }

    #[test]
    fn test_zero_sized_frames() {
        let s: Scene = EXAMPLE.parse().unwrap();

        let frame = render(&s, &RenderOptions { columns: 0, rows: 3 }, None);
        assert_eq!(frame.hit_count(), 0);
        assert_eq!(frame.to_ascii('#', '.'), "\n\n\n");

        let frame = render(&s, &RenderOptions { columns: 5, rows: 0 }, None);
        assert_eq!(frame.to_ascii('#', '.'), "");
        assert_eq!(frame.to_image().dimensions(), (5, 0));
    }

    #[test]
    fn test_is_hit_row_major() {
        let frame = Frame { columns: 3, rows: 2, hits: vec![false, false, true, true, false, false] };
        assert!(frame.is_hit(2, 0));
        assert!(frame.is_hit(0, 1));
        assert!(!frame.is_hit(2, 1));
        assert_eq!(frame.to_ascii('#', '.'), "..#\n#..\n");
    }

    #[test]
    #[should_panic(expected = "outside frame")]
    fn test_is_hit_out_of_range() {
        let frame = render(&Scene::default(), &RenderOptions { columns: 3, rows: 2 }, None);
        frame.is_hit(3, 0);
    }

    #[test]
    fn test_to_image() {
        let s: Scene = EXAMPLE.parse().unwrap();
        let frame = render(&s, &RenderOptions { columns: 8, rows: 6 }, None);
        let img = frame.to_image();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(4, 0).0, [255]);
        let lit = img.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(lit, frame.hit_count());
    }

    #[test]
    fn test_progress_counts_rows() {
        let bar = ProgressBar::hidden();
        let s: Scene = EXAMPLE.parse().unwrap();
        render(&s, &RenderOptions { columns: 5, rows: 7 }, Some(&bar));
        assert_eq!(bar.position(), 7);
    }
}
