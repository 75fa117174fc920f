//! Double-precision math for the pt path tracer.
//!
//! Vectors double as points, directions and linear RGB colors. Everything
//! here is a plain value type; arithmetic always produces new values.

pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{
    is_near_zero, normalize_or, random_in_unit_sphere, random_unit_vector, reflect, refract,
};

/// General 3-component vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, components nominally in `[0, 1]`.
pub type Color = DVec3;
