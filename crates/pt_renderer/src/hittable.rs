//! Hittable primitives and HitRecord for ray-object intersection.

use std::fmt;

use pt_math::{Interval, Point3, Ray, Vec3};

use crate::{Material, Sphere};

/// Distance secondary rays are lifted off the surface they leave from.
pub const SPAWN_OFFSET: f64 = 1e-6;

/// Record of a ray-object intersection.
///
/// Borrowed from the scene for the duration of a single bounce.
#[derive(Debug, Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from an outward-facing unit normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so we need to track whether we hit the front or back face.
    pub fn new(ray: &Ray, t: f64, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }

    /// Start a secondary ray at this hit.
    ///
    /// The origin is nudged off the surface on whichever side `direction`
    /// leaves through so the new ray cannot re-hit the surface at `t ≈ 0`.
    pub fn spawn_ray(&self, direction: Vec3) -> Ray {
        let side = if direction.dot(self.normal) < 0.0 { -1.0 } else { 1.0 };
        Ray::new(self.p + self.normal * (side * SPAWN_OFFSET), direction)
    }
}

/// A geometric primitive that rays can intersect.
#[derive(Debug, Clone, PartialEq)]
pub enum Hittable {
    Sphere(Sphere),
}

impl Hittable {
    /// Nearest intersection of `ray` within `ray_t`, if any.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match self {
            Hittable::Sphere(sphere) => sphere.hit(ray, ray_t),
        }
    }

    /// The material owned by this primitive.
    pub fn material(&self) -> &Material {
        match self {
            Hittable::Sphere(sphere) => sphere.material(),
        }
    }
}

impl From<Sphere> for Hittable {
    fn from(sphere: Sphere) -> Self {
        Hittable::Sphere(sphere)
    }
}

impl fmt::Display for Hittable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hittable::Sphere(sphere) => write!(
                f,
                "Sphere(center: {}, radius: {}, material: {})",
                sphere.center(),
                sphere.radius(),
                sphere.material()
            ),
        }
    }
}
