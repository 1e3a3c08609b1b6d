//! Scene storage and nearest-hit queries.
//!
//! Geometry and surface behavior live in two flat, index-aligned arrays:
//! `materials[i]` describes the surface of `spheres[i]`. The scene is built
//! once by the host and read-only during rendering.

use crate::material::Material;
use crate::sphere::{RayHit, Sphere};
use prism_math::{Interval, Ray};
use thiserror::Error;

/// Lower bound on accepted hit parameters.
///
/// A small positive epsilon rather than zero, so a scattered ray does not
/// immediately re-hit the surface it just left (shadow acne).
pub const T_EPSILON: f32 = 0.0005;

/// Upper bound on accepted hit parameters; effectively the no-hit sentinel.
pub const T_MAX: f32 = 9_999_999.0;

/// Errors detected when assembling a scene.
#[derive(Debug, Error, PartialEq)]
pub enum SceneError {
    #[error("sphere count {spheres} does not match material count {materials}")]
    MaterialCountMismatch { spheres: usize, materials: usize },

    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("refractive index must be positive, got {0}")]
    InvalidRefractiveIndex(f32),
}

/// A renderable scene: spheres plus their index-aligned materials.
#[derive(Debug, Clone)]
pub struct Scene {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
}

impl Scene {
    /// Build a scene, rejecting misaligned sphere/material arrays.
    pub fn new(spheres: Vec<Sphere>, materials: Vec<Material>) -> Result<Self, SceneError> {
        if spheres.len() != materials.len() {
            return Err(SceneError::MaterialCountMismatch {
                spheres: spheres.len(),
                materials: materials.len(),
            });
        }
        Ok(Self { spheres, materials })
    }

    /// Number of spheres (== number of materials).
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    /// Material of the sphere at `index`.
    pub fn material(&self, index: usize) -> &Material {
        &self.materials[index]
    }

    /// Find the closest hit along the ray within `ray_t`.
    ///
    /// Linear sweep over every sphere, shrinking the interval's max to the
    /// closest accepted `t` so far. Returns the winning sphere's index along
    /// with the hit record.
    pub fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<(usize, RayHit)> {
        let mut closest = ray_t.max;
        let mut nearest = None;

        for (index, sphere) in self.spheres.iter().enumerate() {
            if let Some(hit) = sphere.hit(ray, Interval::new(ray_t.min, closest)) {
                closest = hit.t;
                nearest = Some((index, hit));
            }
        }

        nearest
    }
}
