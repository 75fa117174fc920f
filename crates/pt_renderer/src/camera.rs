//! Camera for ray generation and the tiled render entry point.

use std::fmt;

use pt_math::{Point3, Ray, Vec3};
use rand::{Rng, RngCore};
use rayon::prelude::*;

use crate::bucket::Bucket;
use crate::error::{Error, Result};
use crate::image::{Image, Rgb};
use crate::renderer::{render_pixel, tone_map, RenderConfig};
use crate::Scene;

/// Below this length the cross product of `forward` and `up` counts as zero.
const COLLINEAR_EPSILON: f64 = 1e-9;

/// A pinhole camera that owns the scene it looks at.
///
/// The basis is fixed at construction; image size, field of view and
/// sampling settings are supplied per render so one camera can serve many
/// independent (and concurrent) tile renders.
#[derive(Debug, Clone)]
pub struct Camera {
    scene: Scene,
    origin: Point3,
    up: Vec3,
    right: Vec3,
    forward: Vec3,
}

impl Camera {
    /// Create a camera at `origin` looking along `forward`.
    ///
    /// `up` only needs to be roughly upward; it is re-orthogonalized against
    /// `forward`. Zero vectors or an `up` collinear with `forward` are rejected.
    pub fn new(scene: Scene, origin: Point3, up: Vec3, forward: Vec3) -> Result<Self> {
        if !origin.is_finite() {
            return Err(Error::invalid(format!("camera origin must be finite, got {origin}")));
        }
        let forward = forward
            .try_normalize()
            .ok_or_else(|| {
                Error::invalid(format!("camera forward vector is degenerate: {forward}"))
            })?;
        let up = up
            .try_normalize()
            .ok_or_else(|| Error::invalid(format!("camera up vector is degenerate: {up}")))?;

        let right = forward.cross(up);
        if right.length() < COLLINEAR_EPSILON {
            return Err(Error::invalid(format!(
                "camera up {up} and forward {forward} are collinear"
            )));
        }
        let right = right.normalize();
        let up = right.cross(forward);

        Ok(Self {
            scene,
            origin,
            up,
            right,
            forward,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit up vector, orthogonal to `forward`.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Unit right vector; image x grows along it.
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Project the camera onto an image plane for the given settings.
    pub fn viewport(&self, config: &RenderConfig) -> Result<Viewport> {
        config.validate()?;
        Ok(Viewport::new(self, config))
    }

    /// Render `region` of a `config.width` x `config.height` image.
    ///
    /// `None`, or the all-zero sentinel bucket, renders the whole image.
    /// The returned image has the region's size. Every pixel depends only on
    /// the scene, the settings and its global position, so stitching tiles
    /// together reproduces a full render exactly.
    pub fn render(&self, config: &RenderConfig, region: Option<Bucket>) -> Result<Image> {
        let viewport = self.viewport(config)?;
        let region = Bucket::resolve(region, config.width, config.height)?;

        log::debug!(
            "Rendering region {}x{} at ({}, {}) of {}x{} @ {} spp, depth {}",
            region.width,
            region.height,
            region.x,
            region.y,
            config.width,
            config.height,
            config.samples_per_pixel,
            config.max_depth
        );

        let mut pixels: Vec<Rgb> = vec![[0; 3]; region.pixel_count() as usize];
        pixels
            .par_chunks_mut(region.width as usize)
            .enumerate()
            .for_each(|(local_y, row)| {
                let y = region.y + local_y as u32;
                for (local_x, pixel) in row.iter_mut().enumerate() {
                    let x = region.x + local_x as u32;
                    *pixel = tone_map(render_pixel(&viewport, &self.scene, x, y, config));
                }
            });

        Ok(Image::from_pixels(region.width, region.height, pixels))
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Camera(origin: {}, up: {}, right: {}, forward: {})",
            self.origin, self.up, self.right, self.forward
        )?;
        write!(f, "{}", self.scene)
    }
}

/// Image plane at unit distance in front of the camera for one render.
///
/// The field of view is horizontal; the vertical extent follows from the
/// aspect ratio so pixels stay square.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    origin: Point3,
    pixel00_dir: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
}

impl Viewport {
    fn new(camera: &Camera, config: &RenderConfig) -> Self {
        let half_width = (config.fov.to_radians() / 2.0).tan();
        let half_height = half_width * config.height as f64 / config.width as f64;

        // Calculate viewport vectors
        let viewport_u = 2.0 * half_width * camera.right;
        let viewport_v = -2.0 * half_height * camera.up;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / config.width as f64;
        let pixel_delta_v = viewport_v / config.height as f64;

        // Direction to the upper left corner, then to the centre of pixel (0, 0)
        let viewport_upper_left = camera.forward - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_dir = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            origin: camera.origin,
            pixel00_dir,
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Ray through the exact centre of pixel (i, j).
    pub fn center_ray(&self, i: u32, j: u32) -> Ray {
        self.ray_through(i as f64, j as f64)
    }

    /// Generate a ray for pixel (i, j) with a random sub-pixel offset.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset_u = rng.gen_range(-0.5..0.5);
        let offset_v = rng.gen_range(-0.5..0.5);
        self.ray_through(i as f64 + offset_u, j as f64 + offset_v)
    }

    fn ray_through(&self, u: f64, v: f64) -> Ray {
        let direction = self.pixel00_dir + u * self.pixel_delta_u + v * self.pixel_delta_v;
        Ray::new(self.origin, direction)
    }
}
