//! Sphere primitive for ray tracing.

use pt_math::{Interval, Point3, Ray};

use crate::error::{Error, Result};
use crate::{HitRecord, Material};

/// A sphere primitive that exclusively owns its material.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Material,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius must be positive and finite.
    pub fn new(center: Point3, radius: f64, material: impl Into<Material>) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::invalid(format!(
                "sphere radius must be positive, got {radius}"
            )));
        }
        if !center.is_finite() {
            return Err(Error::invalid(format!(
                "sphere center must be finite, got {center}"
            )));
        }

        Ok(Self {
            center,
            radius,
            material: material.into(),
        })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Intersect `ray` with this sphere, returning the nearest hit within `ray_t`.
    ///
    /// Substituting the ray into `|P - C|^2 = r^2` gives a quadratic in `t`.
    /// The smaller root wins unless it falls outside `ray_t`, in which case
    /// the larger root is tried.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.contains(root) {
            root = (h + sqrtd) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }
}
