//! Surface materials and how they scatter light.
//!
//! Materials are a closed set, so they are a plain enum dispatched by
//! `match` instead of a trait object.

use std::fmt;

use pt_math::{
    is_near_zero, random_in_unit_sphere, random_unit_vector, reflect, refract, Color, Ray,
};
use rand::{Rng, RngCore};

use crate::error::{Error, Result};
use crate::hittable::HitRecord;

/// Outgoing light path produced by a scattering material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    /// Component-wise multiplier applied to the light arriving along `scattered`
    pub attenuation: Color,
    /// The secondary ray to keep tracing
    pub scattered: Ray,
}

/// Describes how light interacts with a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    /// Diffuse reflector, optionally glossy.
    Lambertian(Lambertian),
    /// Clear refractive surface such as glass or water.
    Dielectric(Dielectric),
    /// Visualizes surface normals. Never scatters; the path ends with the
    /// normal remapped into color space.
    Debugon,
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the path ends at this surface. Use
    /// [`Material::terminal_color`] to find what such a path contributes.
    pub fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(lambertian) => lambertian.scatter(ray_in, rec, rng),
            Material::Dielectric(dielectric) => Some(dielectric.scatter(ray_in, rec, rng)),
            Material::Debugon => None,
        }
    }

    /// Color contributed by a path that ends at this surface without scattering.
    ///
    /// `None` means the light was absorbed.
    pub fn terminal_color(&self, rec: &HitRecord) -> Option<Color> {
        match self {
            Material::Debugon => Some(0.5 * (rec.normal + Color::ONE)),
            Material::Lambertian(_) | Material::Dielectric(_) => None,
        }
    }
}

impl From<Lambertian> for Material {
    fn from(lambertian: Lambertian) -> Self {
        Material::Lambertian(lambertian)
    }
}

impl From<Dielectric> for Material {
    fn from(dielectric: Dielectric) -> Self {
        Material::Dielectric(dielectric)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::Lambertian(l) => match l.fuzziness {
                Some(fuzz) => write!(f, "Lambertian(albedo: {}, fuzziness: {})", l.albedo, fuzz),
                None => write!(f, "Lambertian(albedo: {})", l.albedo),
            },
            Material::Dielectric(d) => write!(f, "Dielectric(ior: {})", d.ior),
            Material::Debugon => write!(f, "Debugon"),
        }
    }
}

/// Lambertian (diffuse) material.
///
/// With a fuzziness set it becomes the glossy variant: the incoming ray is
/// mirrored about the normal and then perturbed, and rays pushed below the
/// surface are absorbed.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambertian {
    albedo: Color,
    fuzziness: Option<f64>,
}

impl Lambertian {
    /// Create a diffuse material with the given albedo color.
    pub fn new(albedo: Color) -> Result<Self> {
        validate_color("albedo", albedo)?;
        Ok(Self {
            albedo,
            fuzziness: None,
        })
    }

    /// Create a glossy material.
    ///
    /// - `albedo`: The color of the surface
    /// - `fuzziness`: 0.0 = perfect mirror, 1.0 = very rough
    pub fn glossy(albedo: Color, fuzziness: f64) -> Result<Self> {
        validate_color("albedo", albedo)?;
        if !(0.0..=1.0).contains(&fuzziness) {
            return Err(Error::invalid(format!(
                "fuzziness must be within [0, 1], got {fuzziness}"
            )));
        }
        Ok(Self {
            albedo,
            fuzziness: Some(fuzziness),
        })
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzziness(&self) -> Option<f64> {
        self.fuzziness
    }

    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let direction = match self.fuzziness {
            None => {
                let direction = rec.normal + random_unit_vector(rng);
                // Catch degenerate scatter direction
                if is_near_zero(direction) {
                    rec.normal
                } else {
                    direction
                }
            }
            Some(fuzz) => {
                let reflected = reflect(ray_in.direction().normalize(), rec.normal);
                let direction = reflected + fuzz * random_in_unit_sphere(rng);
                if direction.dot(rec.normal) <= 0.0 {
                    return None;
                }
                direction
            }
        };

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: rec.spawn_ray(direction),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Result<Self> {
        if !ior.is_finite() || ior <= 0.0 {
            return Err(Error::invalid(format!(
                "refractive index must be positive, got {ior}"
            )));
        }
        Ok(Self { ior })
    }

    pub fn ior(&self) -> f64 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, ior: f64) -> f64 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> ScatterResult {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Check for total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction =
            if cannot_refract || Self::reflectance(cos_theta, refraction_ratio) > rng.gen::<f64>() {
                reflect(unit_direction, rec.normal)
            } else {
                refract(unit_direction, rec.normal, refraction_ratio)
            };

        ScatterResult {
            attenuation: Color::ONE,
            scattered: rec.spawn_ray(direction),
        }
    }
}

/// Reject colors with a component outside `[0, 1]`, including NaN.
pub(crate) fn validate_color(name: &str, color: Color) -> Result<()> {
    let in_range = |c: f64| (0.0..=1.0).contains(&c);
    if in_range(color.x) && in_range(color.y) && in_range(color.z) {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{name} components must be within [0, 1], got {color}"
        )))
    }
}
