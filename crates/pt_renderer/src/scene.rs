//! Scene construction and nearest-hit queries.
//!
//! A scene is assembled with [`SceneBuilder`], which takes ownership of every
//! object handed to it, and then frozen into an immutable [`Scene`]. Only the
//! frozen form can be queried, so no object can change while renders are in
//! flight.

use std::fmt;

use pt_math::{Interval, Ray};

use crate::{HitRecord, Hittable};

/// Collects objects for a scene. Insertion order is preserved.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    objects: Vec<Hittable>,
}

impl SceneBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move an object into the scene.
    pub fn add(&mut self, object: impl Into<Hittable>) -> &mut Self {
        self.objects.push(object.into());
        self
    }

    /// Builder-style variant of [`SceneBuilder::add`].
    pub fn with(mut self, object: impl Into<Hittable>) -> Self {
        self.add(object);
        self
    }

    /// Get the number of objects added so far.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Freeze the collected objects into a queryable scene.
    pub fn build(self) -> Scene {
        log::debug!("Scene frozen with {} objects", self.objects.len());
        Scene {
            objects: self.objects.into_boxed_slice(),
        }
    }
}

/// An immutable collection of objects.
///
/// Queries scan every object linearly. A bounding volume hierarchy would
/// replace the body of [`Scene::intersect`] without changing its contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Box<[Hittable]>,
}

impl Scene {
    /// Find the nearest intersection of `ray` within `ray_t`.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        for object in self.objects.iter() {
            if let Some(rec) = object.hit(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }

    /// Objects in insertion order.
    pub fn objects(&self) -> &[Hittable] {
        &self.objects
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scene ({} objects)", self.objects.len())?;
        for (index, object) in self.objects.iter().enumerate() {
            writeln!(f, "  [{index}] {object}")?;
        }
        Ok(())
    }
}
