//! CPU Monte Carlo path tracer.
//!
//! Build a [`Scene`] with a [`SceneBuilder`], hand it to a [`Camera`] and
//! call [`Camera::render`] for the whole image or any tile of it, or
//! [`render_buckets`] to let rayon split the image into tiles.
//!
//! # Example
//!
//! ```
//! use pt_renderer::{Camera, Lambertian, RenderConfig, SceneBuilder, Sphere};
//! use pt_renderer::{Color, Point3, Vec3};
//!
//! let scene = SceneBuilder::new()
//!     .with(Sphere::new(Point3::ZERO, 1.0, Lambertian::new(Color::splat(0.5))?)?)
//!     .build();
//! let camera = Camera::new(scene, Point3::new(0.0, 0.0, -5.0), Vec3::Y, Vec3::Z)?;
//!
//! let config = RenderConfig {
//!     width: 32,
//!     height: 32,
//!     samples_per_pixel: 4,
//!     ..Default::default()
//! };
//! let image = camera.render(&config, None)?;
//! assert_eq!(image.width(), 32);
//! # Ok::<(), pt_renderer::Error>(())
//! ```

mod bucket;
mod camera;
mod error;
mod hittable;
mod image;
mod material;
mod renderer;
mod scene;
mod sphere;

pub use bucket::{generate_buckets, render_buckets, Bucket, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, Viewport};
pub use error::{Error, Result};
pub use hittable::{HitRecord, Hittable, SPAWN_OFFSET};
pub use image::{Image, Rgb};
pub use material::{Dielectric, Lambertian, Material, ScatterResult};
pub use renderer::{
    linear_to_gamma, pixel_rng, ray_color, tone_map, Background, RenderConfig, HIT_EPSILON,
};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;

/// Re-export the math types used throughout the public API
pub use pt_math::{Color, Interval, Point3, Ray, Vec3};
