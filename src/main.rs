use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glyphcast::{
    renderer::{self, RenderOptions},
    scene::load_with,
    ParseOptions, SceneObject,
};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "glyphcast")]
#[command(version)]
#[command(about = "Render a scene file as an ASCII silhouette")]
struct Cli {
    /// Scene description to render
    scene: PathBuf,

    /// Image width in glyphs
    #[arg(long, default_value_t = renderer::DEFAULT_COLUMNS, value_parser = clap::value_parser!(u32).range(1..))]
    columns: u32,

    /// Image height in glyphs
    #[arg(long, default_value_t = renderer::DEFAULT_ROWS, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Glyph for pixels that hit an object
    #[arg(long, default_value_t = '#')]
    hit: char,

    /// Glyph for pixels that hit nothing
    #[arg(long, default_value_t = '.')]
    miss: char,

    /// Also write the silhouette as a grayscale PNG
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,

    /// Warn about unknown fields instead of rejecting the scene
    #[arg(long)]
    lenient: bool,

    /// Print the scene in canonical form and exit
    #[arg(long)]
    print_scene: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Set logging level (overrides RUST_LOG)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the image, logs go to stderr
    let filter = match cli.log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level.as_str()),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // ── parse scene ───────────────────────────────────────────────────────
    let scene = load_with(&cli.scene, ParseOptions { lenient: cli.lenient })
        .context("parse failed")?;

    for (i, obj) in scene.objects().iter().enumerate() {
        match obj {
            SceneObject::Camera(c) => {
                tracing::info!("[{i}] Camera {{ width: {:.4}, height: {:.4} }}", c.width, c.height);
            }
            SceneObject::Sphere(s) => {
                tracing::info!("[{i}] Sphere {{ center: {:?}, radius: {:.4} }}", s.center, s.radius);
            }
            SceneObject::Plane(p) => {
                tracing::info!("[{i}] Plane {{ point: {:?}, normal: {:?} }}", p.point, p.normal());
            }
            SceneObject::Cylinder(c) => {
                tracing::info!("[{i}] Cylinder {{ center: {:?}, radius: {:.4} }}", c.center, c.radius);
            }
        }
    }

    let mut stdout = std::io::stdout().lock();
    if cli.print_scene {
        writeln!(stdout, "{}", scene.to_json()?)?;
        return Ok(());
    }

    // ── cast rays ─────────────────────────────────────────────────────────
    let opts = RenderOptions { columns: cli.columns, rows: cli.rows };
    let bar = if !cli.quiet {
        let pb = ProgressBar::new(opts.rows as u64);
        pb.set_style(ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} rows | {elapsed_precise}")?);
        Some(pb)
    } else {
        None
    };

    let frame = renderer::render(&scene, &opts, bar.as_ref());
    if let Some(b) = bar {
        b.finish_and_clear();
    }
    tracing::info!(hits = frame.hit_count(), "render complete");

    stdout.write_all(frame.to_ascii(cli.hit, cli.miss).as_bytes())?;

    if let Some(path) = &cli.png {
        frame.to_image()
            .save(path)
            .with_context(|| format!("could not write {}", path.display()))?;
        tracing::info!(path = %path.display(), "saved silhouette");
    }
    Ok(())
}
