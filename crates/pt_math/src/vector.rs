//! Vector helpers used by scattering: reflection, refraction and
//! random direction sampling.

use rand::Rng;
use rand_distr::{Distribution, UnitBall, UnitSphere};

use crate::Vec3;

/// Squared length below which a vector is treated as degenerate.
const NEAR_ZERO: f64 = 1e-16;

/// Returns true if every component of `v` is close to zero.
#[inline]
pub fn is_near_zero(v: Vec3) -> bool {
    v.length_squared() < NEAR_ZERO
}

/// Normalize `v`, substituting `fallback` when `v` has no usable direction.
#[inline]
pub fn normalize_or(v: Vec3, fallback: Vec3) -> Vec3 {
    v.try_normalize().unwrap_or(fallback)
}

/// Reflect a vector about a normal.
///
/// `n` is expected to be unit length.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the boundary.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// A uniformly distributed point inside the unit sphere.
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let p: [f64; 3] = UnitBall.sample(rng);
    Vec3::from(p)
}

/// A uniformly distributed direction on the unit sphere.
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let p: [f64; 3] = UnitSphere.sample(rng);
    Vec3::from(p)
}
