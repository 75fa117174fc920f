//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with an exact bounce limit
//! - Gamma correction
//! - Anti-aliasing via multi-sampling
//! - One seeded random stream per pixel, so results do not depend on
//!   thread count, tiling or render order

use pt_math::{normalize_or, Color, Interval, Ray, Vec3};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::camera::Viewport;
use crate::error::{Error, Result};
use crate::image::Rgb;
use crate::material::validate_color;
use crate::Scene;

/// Rays closer than this to their origin are ignored to suppress shadow acne.
pub const HIT_EPSILON: f64 = 0.001;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Background {
    /// White at the horizon blending to sky blue straight up.
    #[default]
    Sky,
    /// The same color in every direction.
    Constant { color: Color },
}

impl Background {
    /// Color returned for a ray that hits nothing.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Constant { color } => *color,
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Full image width in pixels
    pub width: u32,
    /// Full image height in pixels
    pub height: u32,
    /// Horizontal field of view in degrees
    pub fov: f64,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Base seed for every per-pixel random stream
    pub seed: u64,
    /// Color returned when a ray doesn't hit anything
    pub background: Background,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov: 90.0,
            max_depth: 10,
            samples_per_pixel: 100,
            seed: 0,
            background: Background::Sky,
        }
    }
}

impl RenderConfig {
    /// Check the settings before any work is done.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::invalid(format!(
                "image size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(Error::invalid("samples per pixel must be at least 1"));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(Error::invalid(format!(
                "field of view must be within (0, 180) degrees, got {}",
                self.fov
            )));
        }
        if let Background::Constant { color } = self.background {
            validate_color("background color", color)?;
        }
        Ok(())
    }
}

/// Compute the color seen by a ray.
///
/// This is the core path tracing function. It traces the ray through
/// the scene, bouncing off surfaces and multiplying in each attenuation.
/// Every call consumes one unit of `depth`, so a path never makes more than
/// `depth` intersection queries.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.intersect(ray, Interval::new(HIT_EPSILON, f64::INFINITY)) else {
        return background.color(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            result.attenuation * ray_color(&result.scattered, scene, depth - 1, background, rng)
        }
        // Terminal materials report their own color; everything else absorbed the ray.
        None => rec.material.terminal_color(&rec).unwrap_or(Color::ZERO),
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = normalize_or(ray.direction(), Vec3::ZERO);
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to 8-bit RGB.
pub fn tone_map(color: Color) -> Rgb {
    let unit = Interval::new(0.0, 1.0);
    let quantize = |c: f64| (255.0 * unit.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Random stream for the pixel at global position `(x, y)`.
pub fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let position = (u64::from(y) << 32) | u64::from(x);
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(position)))
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Render a single pixel with multi-sampling, returning the averaged linear color.
pub(crate) fn render_pixel(
    viewport: &Viewport,
    scene: &Scene,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Color {
    let mut rng = pixel_rng(config.seed, x, y);
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        // get_ray already adds random offset for anti-aliasing
        let ray = viewport.get_ray(x, y, &mut rng);
        pixel_color += ray_color(&ray, scene, config.max_depth, &config.background, &mut rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Material, SceneBuilder, Sphere};
    use pt_math::{Point3, Vec3};
    use rand::Rng;

    fn single_sphere(material: impl Into<Material>) -> Scene {
        SceneBuilder::new()
            .with(Sphere::new(Point3::ZERO, 1.0, material).unwrap())
            .build()
    }

    #[test]
    fn test_sky_gradient() {
        let up_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Y));
        let down_color = sky_gradient(&Ray::new(Vec3::ZERO, -Vec3::Y));

        assert_eq!(up_color, Color::new(0.5, 0.7, 1.0));
        assert_eq!(down_color, Color::ONE);

        // A zero direction has no elevation and lands halfway up the gradient.
        let degenerate = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::ZERO));
        assert!((degenerate - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let scene = single_sphere(Material::Debugon);
        let background = Background::Constant { color: Color::ONE };
        let mut rng = StdRng::seed_from_u64(0);

        let hit = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::Z);
        let miss = Ray::new(Point3::new(0.0, 0.0, -5.0), -Vec3::Z);
        assert_eq!(ray_color(&hit, &scene, 0, &background, &mut rng), Color::ZERO);
        assert_eq!(ray_color(&miss, &scene, 0, &background, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = SceneBuilder::new().build();
        let background = Background::Constant {
            color: Color::new(0.2, 0.4, 0.6),
        };
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.3, 0.1, 1.0));
        assert_eq!(ray_color(&ray, &scene, 5, &background, &mut rng), Color::new(0.2, 0.4, 0.6));
    }

    #[test]
    fn test_debugon_bypasses_recursion() {
        let scene = single_sphere(Material::Debugon);
        let background = Background::Constant { color: Color::ZERO };
        let mut rng = StdRng::seed_from_u64(0);

        let ray = Ray::new(Point3::new(0.0, 0.0, -5.0), Vec3::Z);
        let color = ray_color(&ray, &scene, 1, &background, &mut rng);
        assert!((color - Color::new(0.5, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_diffuse_convex_sphere_scales_background() {
        // Bounces off a convex object always escape, so one bounce sees albedo * background.
        let scene = single_sphere(Lambertian::new(Color::new(0.5, 0.25, 1.0)).unwrap());
        let background = Background::Constant { color: Color::ONE };
        let mut rng = StdRng::seed_from_u64(17);

        for _ in 0..100 {
            let ray = Ray::new(
                Point3::new(rng.gen_range(-0.5..0.5), rng.gen_range(-0.5..0.5), -5.0),
                Vec3::Z,
            );
            let color = ray_color(&ray, &scene, 2, &background, &mut rng);
            assert_eq!(color, Color::new(0.5, 0.25, 1.0));

            // Without a bounce left the path cannot reach the background.
            assert_eq!(ray_color(&ray, &scene, 1, &background, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tone_map() {
        assert_eq!(tone_map(Color::ZERO), [0, 0, 0]);
        assert_eq!(tone_map(Color::ONE), [255, 255, 255]);
        assert_eq!(tone_map(Color::new(0.25, 2.0, -1.0)), [127, 255, 0]);
    }

    #[test]
    fn test_pixel_rng_is_per_pixel_and_reproducible() {
        let a = pixel_rng(7, 3, 4).next_u64();
        assert_eq!(a, pixel_rng(7, 3, 4).next_u64());
        assert_ne!(a, pixel_rng(7, 4, 3).next_u64());
        assert_ne!(a, pixel_rng(8, 3, 4).next_u64());
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let invalid = [
            RenderConfig { width: 0, ..Default::default() },
            RenderConfig { height: 0, ..Default::default() },
            RenderConfig { samples_per_pixel: 0, ..Default::default() },
            RenderConfig { fov: 0.0, ..Default::default() },
            RenderConfig { fov: 180.0, ..Default::default() },
            RenderConfig { fov: f64::NAN, ..Default::default() },
            RenderConfig {
                background: Background::Constant { color: Color::new(5.0, -1.0, 0.0) },
                ..Default::default()
            },
            RenderConfig {
                background: Background::Constant { color: Color::new(f64::NAN, 0.0, 0.0) },
                ..Default::default()
            },
            RenderConfig {
                background: Background::Constant { color: Color::new(0.5, 0.5, 1.01) },
                ..Default::default()
            },
        ];
        for config in invalid {
            assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))), "{config:?}");
        }

        // A zero bounce budget is legal; it just renders black.
        assert!(RenderConfig { max_depth: 0, ..Default::default() }.validate().is_ok());
        for color in [Color::ZERO, Color::ONE, Color::new(0.2, 0.4, 0.6)] {
            let config = RenderConfig {
                background: Background::Constant { color },
                ..Default::default()
            };
            assert!(config.validate().is_ok(), "{color:?}");
        }
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig = serde_json::from_str(
            r#"{
                "width": 64,
                "height": 32,
                "samples_per_pixel": 4,
                "background": { "kind": "constant", "color": [0.1, 0.2, 0.3] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.width, 64);
        assert_eq!(config.height, 32);
        assert_eq!(config.samples_per_pixel, 4);
        assert_eq!(config.fov, 90.0);
        assert_eq!(
            config.background,
            Background::Constant {
                color: Color::new(0.1, 0.2, 0.3)
            }
        );

        let sky: RenderConfig =
            serde_json::from_str(r#"{ "background": { "kind": "sky" } }"#).unwrap();
        assert_eq!(sky.background, Background::Sky);
    }
}
