use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use pt_renderer::{RenderConfig, DEFAULT_BUCKET_SIZE};

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in demo scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// One grey diffuse sphere at the origin
    Single,
    /// One sphere shaded by its surface normals
    Debug,
    /// Ground plus diffuse, glossy and glass spheres
    Spheres,
}

#[derive(Debug, Parser)]
#[command(name = "pt")]
#[command(about = "Render a built-in scene with the pt path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "spheres")]
    pub scene: SceneChoice,

    /// Output PNG path
    #[arg(short, long, default_value = "render.png")]
    pub output: PathBuf,

    /// JSON render configuration; the flags below override its fields
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Horizontal field of view in degrees
    #[arg(long)]
    pub fov: Option<f64>,

    /// Maximum number of bounces per path
    #[arg(long)]
    pub bounces: Option<u32>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Seed for the per-pixel random streams
    #[arg(long)]
    pub seed: Option<u64>,

    /// Edge length of the square tiles rendered in parallel
    #[arg(
        long,
        default_value_t = DEFAULT_BUCKET_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub bucket_size: u32,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Overlay the flags that were given on top of `config`.
    pub fn apply_overrides(&self, mut config: RenderConfig) -> RenderConfig {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(fov) = self.fov {
            config.fov = fov;
        }
        if let Some(bounces) = self.bounces {
            config.max_depth = bounces;
        }
        if let Some(samples) = self.samples_per_pixel {
            config.samples_per_pixel = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }
}
